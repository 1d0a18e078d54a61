//! Full users lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client and
//! service operation over real HTTP through `ReqwestTransport`. Validates
//! that request building, bearer auth, error normalization and response
//! parsing work end-to-end.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use gorest_core::{
    ClientError, CreateUser, Gender, GoRestClient, GoRestConfig, ReqwestTransport, SearchField,
    SortDirection, SortField, Status, UpdateUser, UsersApi, UsersService,
};

const TOKEN: &str = "integration-token";

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_server::run(listener, TOKEN).await });
    format!("http://{addr}")
}

fn client(base_url: &str, token: &str) -> GoRestClient<ReqwestTransport> {
    let config = GoRestConfig::new(base_url, token).with_timeout(Duration::from_secs(5));
    let transport = ReqwestTransport::new(config.timeout).unwrap();
    GoRestClient::new(&config, transport)
}

fn input(name: &str, email: &str, gender: Gender) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        gender,
        status: Status::Active,
    }
}

#[tokio::test]
async fn users_lifecycle() {
    let base_url = start_server().await;
    let service = UsersService::new(client(&base_url, TOKEN));

    // Step 1: first page is empty.
    let users = service.find_all_on_page(0).await.unwrap();
    assert!(users.is_empty(), "expected empty page");

    // Step 2: create, then round-trip through fetch.
    let zoro_input = input("Zoro", "zoro@zoro.test", Gender::Female);
    let zoro = service.create(&zoro_input).await.unwrap();
    let fetched = service.find_one(zoro.id).await.unwrap();
    assert_eq!(fetched.name, zoro_input.name);
    assert_eq!(fetched.email, zoro_input.email);
    assert_eq!(fetched.gender, zoro_input.gender);
    assert_eq!(fetched.status, zoro_input.status);

    // Step 3: fetching twice without a mutation is idempotent.
    let again = service.find_one(zoro.id).await.unwrap();
    assert_eq!(fetched, again);

    // Step 4: a second user, then page + sort.
    let alvin = service
        .create(&input("Alvin", "alvin@alvin.test", Gender::Male))
        .await
        .unwrap();
    let mut page = service.find_all_on_page(1).await.unwrap();
    assert_eq!(page.len(), 2);
    service.sort(&mut page, SortField::Name, SortDirection::Asc);
    assert_eq!(page[0].id, alvin.id);
    assert_eq!(page[1].id, zoro.id);
    service.sort(&mut page, SortField::Name, SortDirection::Desc);
    assert_eq!(page[0].id, zoro.id);

    // Step 5: search by field.
    let found = service.search(SearchField::Gender, "male").await.unwrap();
    assert_eq!(found, vec![alvin.clone()]);

    // Step 6: rename via a full re-send of the fetched user.
    let mut renamed = alvin.clone();
    renamed.name = "Bob Smith".to_string();
    let updated = service
        .update(alvin.id, &UpdateUser::from(renamed))
        .await
        .unwrap();
    assert_eq!(updated.name, "Bob Smith");
    assert_eq!(updated.email, alvin.email);

    // Step 7: delete, then the not-found path.
    assert!(service.remove(alvin.id).await.unwrap());
    let err = service.find_one(alvin.id).await.unwrap_err();
    assert_eq!(err.source, ClientError::new("Not Found", 404));

    // Step 8: deleting again is a service error; updating is silently empty.
    assert!(service.remove(alvin.id).await.is_err());
    let patch = UpdateUser {
        name: Some("Ghost".to_string()),
        ..UpdateUser::default()
    };
    assert!(service.update(alvin.id, &patch).await.is_none());
}

#[tokio::test]
async fn duplicate_email_is_unprocessable_entity() {
    let base_url = start_server().await;
    let client = client(&base_url, TOKEN);

    client
        .create_user(&input("Bob Smith", "bob_smith@fakeemail.info", Gender::Male))
        .await
        .unwrap();
    let err = client
        .create_user(&input("Bob Allen", "bob_smith@fakeemail.info", Gender::Male))
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::new("Unprocessable Entity", 422));
}

#[tokio::test]
async fn wrong_token_is_unauthorized() {
    let base_url = start_server().await;
    let client = client(&base_url, "not-the-token");

    let err = client.fetch_users(0).await.unwrap_err();
    assert_eq!(err, ClientError::new("Unauthorized", 401));
    let err = client.delete_user(1).await.unwrap_err();
    assert_eq!(err.status_code, 401);
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = UsersService::new(client(&format!("http://{addr}"), TOKEN));
    let err = service.find_one(1).await.unwrap_err();
    assert_eq!(err.source, ClientError::new("Upstream Error", 502));
    assert_eq!(err.to_string(), "UsersServiceError: 502 Upstream Error");
}

#[tokio::test]
async fn non_canonical_status_text_comes_from_the_wire() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let mut read = 0;
        while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf[read..]).await.unwrap();
            if n == 0 {
                break;
            }
            read += n;
        }
        socket
            .write_all(
                b"HTTP/1.1 520 Web Server Returned An Unknown Error\r\n\
                  content-length: 0\r\nconnection: close\r\n\r\n",
            )
            .await
            .unwrap();
    });

    let err = client(&format!("http://{addr}"), TOKEN)
        .fetch_user(1)
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::new("Web Server Returned An Unknown Error", 520));
}
