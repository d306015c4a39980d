mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Method, Request},
};
use serde_json::json;

#[tokio::test]
async fn zero_id_fails_validation() -> Result<()> {
    let res = common::get(common::app(&[])?, "/api/user/detail?id=0").await?;
    assert_eq!(res.body, json!({"code": 310, "msg": "id 必须大于0", "data": []}));
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_a_type_error() -> Result<()> {
    let res = common::get(common::app(&[])?, "/api/user/detail?id=abc").await?;
    assert_eq!(res.body["code"], 311);
    Ok(())
}

#[tokio::test]
async fn page_size_is_capped() -> Result<()> {
    let res = common::get(common::app(&[])?, "/api/user/list?pageNo=1&pageSize=100").await?;
    assert_eq!(res.body["code"], 310);
    assert_eq!(res.body["msg"], "pageSize 必须在1到60之间");
    Ok(())
}

#[tokio::test]
async fn inverted_date_window_is_rejected() -> Result<()> {
    let uri = "/api/user/list?keyword=&channel=&startTime=2024-02-01&endTime=2024-01-01";
    let res = common::get(common::app(&[])?, uri).await?;
    assert_eq!(res.body["code"], 310);
    assert_eq!(res.body["msg"], "开始时间不能晚于结束时间");
    Ok(())
}

#[tokio::test]
async fn unknown_channel_is_a_type_error() -> Result<()> {
    let res = common::get(common::app(&[])?, "/api/user/list?channel=9").await?;
    assert_eq!(res.body["code"], 311);
    Ok(())
}

#[tokio::test]
async fn register_checks_username() -> Result<()> {
    let cases = [
        ("ab", "用户名必须包含字母和数字，3-12位"),
        ("ab_12", "用户名只能包含字母和数字"),
        ("abcdef", "用户名必须包含至少一个数字"),
        ("123456", "用户名必须包含至少一个字母"),
    ];
    for (username, msg) in cases {
        let body = json!({"username": username, "password": "abc123", "client": 3});
        let res = common::post_json(common::app(&[])?, "/front/register", body).await?;
        assert_eq!(res.body["code"], 310, "{username}");
        assert_eq!(res.body["msg"], msg, "{username}");
    }
    Ok(())
}

#[tokio::test]
async fn register_rejects_unknown_client() -> Result<()> {
    let body = json!({"username": "ann01", "password": "abc123", "client": 0});
    let res = common::post_json(common::app(&[])?, "/front/register", body).await?;
    assert_eq!(res.body["code"], 311);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_type_error() -> Result<()> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/user/edit")
        .header("content-type", "application/json")
        .body(Body::from("{\"id\": "))?;
    let res = common::send(common::app(&[])?, request).await?;
    assert_eq!(res.body["code"], 311);
    Ok(())
}

#[tokio::test]
async fn tabbar_save_needs_items() -> Result<()> {
    let res = common::post_json(common::app(&[])?, "/api/decorate/tabbar/save", json!({"list": []})).await?;
    assert_eq!(res.body, json!({"code": 310, "msg": "导航不能为空", "data": []}));
    Ok(())
}
