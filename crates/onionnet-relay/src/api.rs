//! API routes for a relay node

use actix_web::{web, HttpResponse};

use onionnet_protocol::types::{routes, MessageRequest, ResultResponse};
use onionnet_protocol::STATUS_LIVE;

use crate::error::RelayError;
use crate::node::RelayNode;

/// Configure routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Unparseable bodies fail the same way as undecryptable ones
    let json = web::JsonConfig::default()
        .error_handler(|err, _req| RelayError::MalformedMessage(err.to_string()).into());

    cfg.app_data(json)
        .route(routes::STATUS, web::get().to(status))
        .route(routes::LAST_ENCRYPTED, web::get().to(last_encrypted))
        .route(routes::LAST_DECRYPTED, web::get().to(last_decrypted))
        .route(routes::LAST_DESTINATION, web::get().to(last_destination))
        .route(routes::PRIVATE_KEY, web::get().to(private_key))
        .route(routes::MESSAGE, web::post().to(message));
}

async fn status() -> HttpResponse {
    HttpResponse::Ok().body(STATUS_LIVE)
}

async fn last_encrypted(node: web::Data<RelayNode>) -> HttpResponse {
    HttpResponse::Ok().json(ResultResponse::new(node.last_received_encrypted_message()))
}

async fn last_decrypted(node: web::Data<RelayNode>) -> HttpResponse {
    HttpResponse::Ok().json(ResultResponse::new(node.last_received_decrypted_message()))
}

async fn last_destination(node: web::Data<RelayNode>) -> HttpResponse {
    HttpResponse::Ok().json(ResultResponse::new(node.last_message_destination()))
}

async fn private_key(node: web::Data<RelayNode>) -> HttpResponse {
    HttpResponse::Ok().json(ResultResponse::new(node.exported_private_key()))
}

async fn message(
    node: web::Data<RelayNode>,
    body: web::Json<MessageRequest>,
) -> Result<HttpResponse, RelayError> {
    node.handle_message(body.into_inner().message).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::ChannelForwarder;
    use crate::identity::RelayIdentity;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use onionnet_crypto::keys::{KeyPair, PublicKey};
    use onionnet_protocol::message::seal_layer;
    use std::sync::Arc;

    fn relay() -> web::Data<RelayNode> {
        let (forwarder, _rx) = ChannelForwarder::new();
        web::Data::new(RelayNode::generate(2, Arc::new(forwarder)).unwrap())
    }

    fn public_key(node: &RelayNode) -> PublicKey {
        PublicKey::import(node.identity().exported_public_key()).unwrap()
    }

    #[actix_web::test]
    async fn test_status() {
        let app = test::init_service(
            App::new()
                .app_data(relay())
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/status").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await.as_ref(), b"live");
    }

    #[actix_web::test]
    async fn test_reads_are_null_before_first_message() {
        let app = test::init_service(
            App::new()
                .app_data(relay())
                .configure(configure_routes),
        )
        .await;

        for uri in [
            "/getLastReceivedEncryptedMessage",
            "/getLastReceivedDecryptedMessage",
            "/getLastMessageDestination",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body, serde_json::json!({ "result": null }), "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_message_snapshot_consistency() {
        let node = relay();
        let message = seal_layer(&public_key(&node), 3001, "hello").unwrap();

        let app = test::init_service(
            App::new()
                .app_data(node.clone())
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/message")
            .set_json(MessageRequest { message: message.clone() })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/getLastReceivedEncryptedMessage")
            .to_request();
        let body: ResultResponse<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.result, Some(message));

        let req = test::TestRequest::get()
            .uri("/getLastReceivedDecryptedMessage")
            .to_request();
        let body: ResultResponse<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.result.as_deref(), Some("hello"));

        let req = test::TestRequest::get()
            .uri("/getLastMessageDestination")
            .to_request();
        let body: ResultResponse<u64> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.result, Some(3001));
    }

    #[actix_web::test]
    async fn test_failures_are_indistinguishable() {
        let node = relay();
        let stranger = KeyPair::generate().unwrap();
        let foreign = seal_layer(&stranger.public, 3001, "hello").unwrap();

        let app = test::init_service(
            App::new()
                .app_data(node.clone())
                .configure(configure_routes),
        )
        .await;

        let mut requests = Vec::new();
        for message in ["too short".to_string(), foreign] {
            requests.push(
                test::TestRequest::post()
                    .uri("/message")
                    .set_json(MessageRequest { message }),
            );
        }
        // Bodies the JSON extractor cannot turn into a message
        for body in [
            serde_json::json!({}),
            serde_json::json!({ "message": 5 }),
        ] {
            requests.push(test::TestRequest::post().uri("/message").set_json(body));
        }
        requests.push(
            test::TestRequest::post()
                .uri("/message")
                .insert_header(("content-type", "application/json"))
                .set_payload("not json"),
        );
        requests.push(
            test::TestRequest::post()
                .uri("/message")
                .set_payload("not json"),
        );

        let mut bodies = Vec::new();
        for req in requests {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            bodies.push(test::read_body(resp).await);
        }

        assert!(bodies.iter().all(|body| body.as_ref() == b"error"));
        assert!(node.last_received_encrypted_message().is_none());
    }

    #[actix_web::test]
    async fn test_private_key_endpoint() {
        let node = relay();
        let app = test::init_service(
            App::new()
                .app_data(node.clone())
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/getPrivateKey").to_request();
        let body: ResultResponse<String> = test::call_and_read_body_json(&app, req).await;

        let exported = body.result.unwrap();
        assert_eq!(exported, node.identity().exported_private_key());

        // The published key is enough to rebuild the relay's identity
        let restored = RelayIdentity::from_exported(node.node_id(), &exported).unwrap();
        assert_eq!(
            restored.exported_public_key(),
            node.identity().exported_public_key()
        );
        assert_eq!(restored.fingerprint(), node.identity().fingerprint());
    }
}
