// tests/blog_tests.rs

use std::sync::Arc;

use blog_backend::{config::Config, routes, state::AppState, store::MemoryStore};
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};

async fn spawn_app() -> String {
    let config = Config {
        database_url: "memory".to_string(),
        jwt_secret: "blog_test_secret".to_string(),
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        cookie_secure: false,
    };

    let state = AppState::new(Arc::new(MemoryStore::new()), config);
    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// A signed-in user talking to one spawned app.
struct Session {
    address: String,
    cookie: String,
    client: reqwest::Client,
}

impl Session {
    async fn register(address: &str, email: &str) -> Self {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        let response = client
            .post(format!("{}/users/register", address))
            .json(&serde_json::json!({
                "username": email.split('@').next().unwrap(),
                "email": email,
                "password": "password123"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 201);

        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("access_token="))
            .and_then(|v| v.split(';').next())
            .unwrap()
            .to_string();

        Self {
            address: address.to_string(),
            cookie,
            client,
        }
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .header(COOKIE, &self.cookie)
            .send()
            .await
            .unwrap()
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .header(COOKIE, &self.cookie)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn create_post(&self, title: &str) -> String {
        let response = self
            .post(
                "/blog/create",
                serde_json::json!({
                    "title": title,
                    "subheader": format!("{} subheader", title),
                    "imageUrl": "https://cdn.example.com/cover.png",
                    "content": format!("<p>{} body</p>", title)
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
        let post: serde_json::Value = response.json().await.unwrap();
        post["id"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn navigation_over_three_posts() {
    let address = spawn_app().await;
    let ann = Session::register(&address, "ann@example.com").await;

    let a = ann.create_post("A").await;
    let b = ann.create_post("B").await;
    let c = ann.create_post("C").await;

    let latest: serde_json::Value = ann.get("/blog/post").await.json().await.unwrap();
    assert_eq!(latest["post"]["id"], c.as_str());
    assert!(latest["previousId"].is_null());
    assert_eq!(latest["nextId"], b.as_str());
    assert_eq!(latest["currentUser"]["email"], "ann@example.com");
    assert_eq!(latest["post"]["authorEmail"], "ann@example.com");

    let middle: serde_json::Value = ann
        .get(&format!("/blog/post/{}", b))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(middle["previousId"], c.as_str());
    assert_eq!(middle["nextId"], a.as_str());

    let oldest: serde_json::Value = ann
        .get(&format!("/blog/post/{}", a))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(oldest["previousId"], b.as_str());
    assert!(oldest["nextId"].is_null());

    let missing = ann.get("/blog/post/unknown").await;
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn latest_post_on_empty_blog_is_404() {
    let address = spawn_app().await;
    let ann = Session::register(&address, "ann@example.com").await;

    let response = ann.get("/blog/post").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn create_post_reports_every_blank_field() {
    let address = spawn_app().await;
    let ann = Session::register(&address, "ann@example.com").await;

    let response = ann
        .post(
            "/blog/create",
            serde_json::json!({"title": " ", "subheader": "", "imageUrl": "", "content": "  "}),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn comment_redirects_back_to_post() {
    let address = spawn_app().await;
    let ann = Session::register(&address, "ann@example.com").await;
    let bob = Session::register(&address, "bob@example.com").await;
    let post_id = ann.create_post("A").await;

    let response = bob
        .post(
            "/blog/comment",
            serde_json::json!({"postId": post_id, "body": "First!"}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        response.headers()[LOCATION],
        format!("/blog/post/{}", post_id).as_str()
    );

    bob.post(
        "/blog/comment",
        serde_json::json!({"postId": post_id, "body": "Second"}),
    )
    .await;

    let page: serde_json::Value = ann
        .get(&format!("/blog/post/{}", post_id))
        .await
        .json()
        .await
        .unwrap();
    let comments = page["post"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["body"], "First!");
    assert_eq!(comments[0]["userEmail"], "bob@example.com");
    assert_eq!(comments[1]["body"], "Second");
}

#[tokio::test]
async fn blank_comment_is_rejected_and_not_stored() {
    let address = spawn_app().await;
    let ann = Session::register(&address, "ann@example.com").await;
    let post_id = ann.create_post("A").await;

    let response = ann
        .post(
            "/blog/comment",
            serde_json::json!({"postId": post_id, "body": "   "}),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["errors"],
        serde_json::json!(["Comment is required before submission"])
    );

    let page: serde_json::Value = ann
        .get(&format!("/blog/post/{}", post_id))
        .await
        .json()
        .await
        .unwrap();
    assert!(page["post"]["comments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn comment_without_body_field_is_a_validation_error() {
    let address = spawn_app().await;
    let ann = Session::register(&address, "ann@example.com").await;
    let post_id = ann.create_post("A").await;

    let response = ann
        .post("/blog/comment", serde_json::json!({"postId": post_id}))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"errors": ["Comment is required before submission"]})
    );
}

#[tokio::test]
async fn create_post_with_empty_object_lists_every_field() {
    let address = spawn_app().await;
    let ann = Session::register(&address, "ann@example.com").await;

    let response = ann.post("/blog/create", serde_json::json!({})).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn mistyped_like_body_is_a_validation_error() {
    let address = spawn_app().await;
    let ann = Session::register(&address, "ann@example.com").await;
    let post_id = ann.create_post("A").await;

    let response = ann
        .post(
            "/blog/like",
            serde_json::json!({"postId": post_id, "newLiked": "yes"}),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);

    let page: serde_json::Value = ann
        .get(&format!("/blog/post/{}", post_id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(page["post"]["likeCount"], 0);
}

async fn set_like(session: &Session, post_id: &str, liked: bool) -> serde_json::Value {
    let response = session
        .post(
            "/blog/like",
            serde_json::json!({"postId": post_id, "newLiked": liked}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn like_toggle_is_idempotent() {
    let address = spawn_app().await;
    let ann = Session::register(&address, "ann@example.com").await;
    let bob = Session::register(&address, "bob@example.com").await;
    let post_id = ann.create_post("A").await;

    let first = set_like(&ann, &post_id, true).await;
    assert_eq!(first, serde_json::json!({"likeCount": 1, "userLiked": true}));

    let again = set_like(&ann, &post_id, true).await;
    assert_eq!(again, first);

    let bob_view = set_like(&bob, &post_id, true).await;
    assert_eq!(bob_view, serde_json::json!({"likeCount": 2, "userLiked": true}));

    let unliked = set_like(&ann, &post_id, false).await;
    assert_eq!(unliked, serde_json::json!({"likeCount": 1, "userLiked": false}));

    let page: serde_json::Value = ann
        .get(&format!("/blog/post/{}", post_id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(page["post"]["likeCount"], 1);
    assert_eq!(page["post"]["userLiked"], false);
}

#[tokio::test]
async fn feed_lists_newest_first_with_comments() {
    let address = spawn_app().await;
    let ann = Session::register(&address, "ann@example.com").await;
    let a = ann.create_post("A").await;
    ann.create_post("B").await;
    ann.post(
        "/blog/comment",
        serde_json::json!({"postId": a, "body": "on A"}),
    )
    .await;

    let feed: Vec<serde_json::Value> = ann.get("/blog/all").await.json().await.unwrap();

    let titles: Vec<_> = feed.iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["B", "A"]);
    assert!(feed[0]["comments"].as_array().unwrap().is_empty());
    assert_eq!(feed[1]["comments"][0]["body"], "on A");
    assert!(feed[0].get("likeCount").is_none());
}
