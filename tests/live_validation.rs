use std::env;

use string_analyzer::{client::StringsClient, filters::FilterCriteria};

fn live_base_url() -> String {
    env::var("STRING_ANALYZER_URL")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "http://127.0.0.1:4100".to_string())
}

#[tokio::test]
#[ignore = "Requires a running string analyzer server"]
async fn live_create_list_delete_roundtrip() {
    let client = StringsClient::new(&live_base_url()).expect("client");
    let value = format!("live validation {}", std::process::id());

    let created = client.create(&value).await.expect("create");
    assert_eq!(created.value, value);
    assert_eq!(created.properties.word_count, 3);

    let listed = client
        .list(&FilterCriteria {
            word_count: Some(3),
            ..Default::default()
        })
        .await
        .expect("list");
    assert!(listed.data.iter().any(|view| view.id == created.id));

    client.delete(&value).await.expect("delete");
    assert!(client.get(&value).await.is_err(), "value should be gone");
}
