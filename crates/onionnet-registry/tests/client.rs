//! Registry client against a live registry server

use std::net::TcpListener;

use actix_web::web;

use onionnet_registry::{serve_registry, NodeDirectory, RegistryClient, RegistryError};

fn start_registry() -> RegistryClient {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();

    let server = serve_registry(web::Data::new(NodeDirectory::new()), listener).unwrap();
    actix_web::rt::spawn(server);

    RegistryClient::new(format!("http://{}/", address))
}

#[actix_web::test]
async fn test_register_and_lookup() {
    let client = start_registry();
    assert!(!client.base_url().ends_with('/'));

    assert_eq!(client.status().await.unwrap(), "live");
    assert!(client.list_nodes().await.unwrap().is_empty());

    client.register(3, "key-3").await.unwrap();
    client.register(1, "key-1").await.unwrap();

    let nodes = client.list_nodes().await.unwrap();
    assert_eq!(nodes.iter().map(|n| n.node_id).collect::<Vec<_>>(), vec![3, 1]);

    let node = client.get_node(1).await.unwrap().unwrap();
    assert_eq!(node.pub_key, "key-1");
    assert!(client.get_node(2).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_unreachable_registry() {
    let dead = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let client = RegistryClient::new(format!("http://{}", dead));

    let err = client.register(1, "key").await.unwrap_err();
    assert!(matches!(err, RegistryError::Unreachable(_)));
}
