mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{spawn, text_block};
use jis_site_core::events::SiteEvent;

#[tokio::test]
async fn created_page_reads_back_unchanged() {
    let server = spawn().await;
    let token = server.login().await;
    let content = json!([
        text_block("intro", "<p>Jubail Industrial Services</p>"),
        { "id": "hero", "type": "image", "data": { "src": "/uploads/hero.jpg", "alt": "Plant" } },
        { "id": "grid", "type": "post-grid", "data": { "columns": 2 } }
    ]);

    let response = server
        .post_json(
            "/api/pages",
            &token,
            json!({ "slug": "about-us", "title": "About Us", "content": content }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let (status, page) = server.get_json("/api/pages/about-us").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["title"], "About Us");
    assert_eq!(page["content"], content);

    let (_, pages) = server.get_json("/api/pages").await;
    assert_eq!(pages.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unknown_block_types_survive_a_round_trip() {
    let server = spawn().await;
    let token = server.login().await;
    let content = json!([{ "id": "v", "type": "video", "data": { "url": "https://example.com/v.mp4" } }]);

    server
        .post_json("/api/pages", &token, json!({ "slug": "media", "title": "Media", "content": content }))
        .await;

    let (_, page) = server.get_json("/api/pages/media").await;
    assert_eq!(page["content"], content);
}

#[tokio::test]
async fn missing_page_is_404_json() {
    let server = spawn().await;
    let (status, body) = server.get_json("/api/pages/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Page not found" }));
}

#[tokio::test]
async fn page_creation_is_validated() {
    let server = spawn().await;
    let token = server.login().await;

    let response = server
        .post_json("/api/pages", &token, json!({ "slug": "careers" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .post_json("/api/pages", &token, json!({ "slug": "a b", "title": "Spaces" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let duplicate_ids = json!([text_block("x", "1"), text_block("x", "2")]);
    let response = server
        .post_json(
            "/api/pages",
            &token,
            json!({ "slug": "dupes", "title": "Dupes", "content": duplicate_ids }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let server = spawn().await;
    let token = server.login().await;
    for slug in ["home", "careers"] {
        let response = server
            .post_json("/api/pages", &token, json!({ "slug": slug, "title": slug }))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = server
        .post_json("/api/pages", &token, json!({ "slug": "home", "title": "Again" }))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = server
        .put_json("/api/pages/careers", &token, json!({ "slug": "home" }))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn put_merges_shallowly_and_replaces_content() {
    let server = spawn().await;
    let token = server.login().await;
    server
        .post_json(
            "/api/pages",
            &token,
            json!({
                "slug": "projects",
                "title": "Projects",
                "content": [text_block("a", "old"), text_block("b", "old")]
            }),
        )
        .await;

    let response = server
        .put_json(
            "/api/pages/projects",
            &token,
            json!({ "content": [text_block("b", "new")], "seoDescription": "Our work" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (_, page) = server.get_json("/api/pages/projects").await;
    assert_eq!(page["title"], "Projects");
    assert_eq!(page["content"], json!([text_block("b", "new")]));
    assert_eq!(page["seoDescription"], "Our work");
}

#[tokio::test]
async fn delete_removes_page() {
    let server = spawn().await;
    let token = server.login().await;
    server
        .post_json("/api/pages", &token, json!({ "slug": "old", "title": "Old" }))
        .await;

    let response = server.delete("/api/pages/old", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = server.get_json("/api/pages/old").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = server.delete("/api/pages/old", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Two writers race on one page. The scheduler picks the interleaving, so
/// this only pins that the stored page is one writer's complete result.
/// `overlapping_saves_lose_the_earlier_change` forces the losing order.
#[tokio::test]
async fn concurrent_puts_last_writer_wins() {
    let server = spawn().await;
    let token = server.login().await;
    server
        .post_json("/api/pages", &token, json!({ "slug": "race", "title": "Start" }))
        .await;

    let (first, second) = tokio::join!(
        server.put_json("/api/pages/race", &token, json!({ "title": "Title from A" })),
        server.put_json(
            "/api/pages/race",
            &token,
            json!({ "content": [text_block("b", "from B")] })
        ),
    );
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    let first: Value = first.json().await.unwrap();
    let second: Value = second.json().await.unwrap();

    assert_eq!(first["title"], "Title from A");
    assert_eq!(second["content"], json!([text_block("b", "from B")]));

    let (_, stored) = server.get_json("/api/pages/race").await;
    assert!(stored == first || stored == second);
}

/// Two read-modify-write cycles that both load before either saves. The
/// store takes no lock, so the second save overwrites the first change.
#[tokio::test]
async fn overlapping_saves_lose_the_earlier_change() {
    let server = spawn().await;
    let token = server.login().await;
    server
        .post_json("/api/pages", &token, json!({ "slug": "race", "title": "Start" }))
        .await;

    let store = server.state.store();
    let mut first = store.load().await.unwrap();
    let mut second = store.load().await.unwrap();

    first.pages[0].title = "Title from A".into();
    store.save(&first).await.unwrap();

    second.pages[0].content = serde_json::from_value(json!([text_block("b", "from B")])).unwrap();
    store.save(&second).await.unwrap();

    let (_, stored) = server.get_json("/api/pages/race").await;
    assert_eq!(stored["title"], "Start");
    assert_eq!(stored["content"], json!([text_block("b", "from B")]));
}

#[tokio::test]
async fn unmodelled_block_data_survives_unrelated_saves() {
    let server = spawn().await;
    let token = server.login().await;
    let content = json!([
        { "id": "hero", "type": "image",
          "data": { "src": "/uploads/plant.jpg", "alt": "Plant", "caption": "Jubail plant" } },
        { "id": "show", "type": "slider", "data": {
            "autoplay": true,
            "slides": [{ "id": "s1", "interval": 5, "content": [text_block("s1-t", "one")] }]
        } }
    ]);
    server
        .post_json("/api/pages", &token, json!({ "slug": "gallery", "title": "Gallery", "content": content }))
        .await;

    server
        .put_json("/api/settings", &token, json!({ "title": "JIS" }))
        .await;
    server
        .put_json("/api/pages/gallery", &token, json!({ "title": "Our Plants" }))
        .await;

    let (_, page) = server.get_json("/api/pages/gallery").await;
    assert_eq!(page["title"], "Our Plants");
    assert_eq!(page["content"], content);
}

#[tokio::test]
async fn mutations_publish_events() {
    let server = spawn().await;
    let mut events = server.state.event_bus().subscribe();
    let token = server.login().await;

    server
        .post_json("/api/pages", &token, json!({ "slug": "news", "title": "News" }))
        .await;
    server
        .put_json("/api/pages/news", &token, json!({ "content": [text_block("t", "hi")] }))
        .await;

    assert_eq!(
        events.recv().await.unwrap(),
        SiteEvent::PageCreated { slug: "news".into() }
    );
    match events.recv().await.unwrap() {
        SiteEvent::SlotSaved(saved) => {
            assert_eq!(saved.owner.key(), "page:news");
            assert_eq!(saved.block_count, 1);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn render_composes_header_page_and_footer() {
    let server = spawn().await;
    let token = server.login().await;
    server
        .put_json("/api/settings", &token, json!({ "title": "JIS" }))
        .await;
    server
        .put_json("/api/theme/header", &token, json!({ "content": [text_block("nav", "<nav>Menu</nav>")] }))
        .await;
    server
        .put_json("/api/theme/footer", &token, json!({ "content": [text_block("f", "<p>Footer</p>")] }))
        .await;
    server
        .post_json(
            "/api/pages",
            &token,
            json!({
                "slug": "home",
                "title": "Home",
                "content": [{ "id": "g", "type": "post-grid", "data": { "columns": 3 } }]
            }),
        )
        .await;
    server
        .post_json("/api/pages", &token, json!({ "slug": "careers", "title": "Careers" }))
        .await;

    let response = server.get("/render/home?lang=ar").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("dir=\"rtl\""));
    assert!(html.contains("<title>Home | JIS</title>"));
    assert!(html.contains("<a href=\"/careers\">Read more</a>"));
    let nav = html.find("<nav>Menu</nav>").unwrap();
    let footer = html.find("<p>Footer</p>").unwrap();
    assert!(nav < footer);

    let response = server.get("/render/missing").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
