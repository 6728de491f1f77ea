//! API routes for the registry

use actix_web::{web, HttpResponse};

use onionnet_protocol::types::{routes, NodeRegistry, RegisterNodeRequest, ResultResponse};
use onionnet_protocol::{NodeId, STATUS_LIVE};

use crate::directory::NodeDirectory;

/// Configure routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(routes::STATUS, web::get().to(status))
        .route(routes::REGISTER_NODE, web::post().to(register_node))
        .route(routes::GET_NODE_REGISTRY, web::get().to(get_node_registry))
        .route(routes::GET_NODE, web::get().to(get_node));
}

async fn status() -> HttpResponse {
    HttpResponse::Ok().body(STATUS_LIVE)
}

async fn register_node(
    directory: web::Data<NodeDirectory>,
    body: web::Json<RegisterNodeRequest>,
) -> HttpResponse {
    let body = body.into_inner();
    directory.register(body.node_id, body.pub_key);

    HttpResponse::Ok().body("Node registered")
}

async fn get_node_registry(directory: web::Data<NodeDirectory>) -> HttpResponse {
    HttpResponse::Ok().json(NodeRegistry {
        nodes: directory.list(),
    })
}

async fn get_node(directory: web::Data<NodeDirectory>, path: web::Path<NodeId>) -> HttpResponse {
    HttpResponse::Ok().json(ResultResponse::new(directory.get(path.into_inner())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use onionnet_protocol::types::NodeEntry;

    #[actix_web::test]
    async fn test_status() {
        let directory = web::Data::new(NodeDirectory::new());
        let app = test::init_service(
            App::new()
                .app_data(directory)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/status").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        assert_eq!(body.as_ref(), b"live");
    }

    #[actix_web::test]
    async fn test_register_is_idempotent() {
        let directory = web::Data::new(NodeDirectory::new());
        let app = test::init_service(
            App::new()
                .app_data(directory.clone())
                .configure(configure_routes),
        )
        .await;

        for key in ["first", "second"] {
            let req = test::TestRequest::post()
                .uri("/registerNode")
                .set_json(serde_json::json!({ "nodeId": 4, "pubKey": key }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }

        let req = test::TestRequest::get().uri("/getNodeRegistry").to_request();
        let registry: NodeRegistry = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            registry.nodes,
            vec![NodeEntry {
                node_id: 4,
                pub_key: "first".to_string()
            }]
        );
    }

    #[actix_web::test]
    async fn test_registry_listing_order() {
        let directory = web::Data::new(NodeDirectory::new());
        directory.register(2, "b");
        directory.register(1, "a");

        let app = test::init_service(
            App::new()
                .app_data(directory)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/getNodeRegistry").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            serde_json::json!({ "nodes": [
                { "nodeId": 2, "pubKey": "b" },
                { "nodeId": 1, "pubKey": "a" }
            ]})
        );
    }

    #[actix_web::test]
    async fn test_get_node() {
        let directory = web::Data::new(NodeDirectory::new());
        directory.register(7, "seven");

        let app = test::init_service(
            App::new()
                .app_data(directory)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/getNode/7").to_request();
        let found: ResultResponse<NodeEntry> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.result.unwrap().pub_key, "seven");

        let req = test::TestRequest::get().uri("/getNode/8").to_request();
        let missing: ResultResponse<NodeEntry> = test::call_and_read_body_json(&app, req).await;
        assert!(missing.result.is_none());
    }
}
