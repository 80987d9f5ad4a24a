use std::sync::Arc;

use mockito::{Matcher, Server, ServerGuard};
use recipe_lab::{
    CuisineStyle, DietaryPreference, DishSelection, GeminiProvider, MealType, RecipeError,
    RecipeRequest, Session,
};
use serde_json::json;

const PATH: &str = "/v1beta/models/gemini-2.0-flash:streamGenerateContent";

fn sse_body(texts: &[&str]) -> String {
    texts
        .iter()
        .map(|text| {
            format!(
                "data: {}\r\n\r\n",
                json!({"candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]})
            )
        })
        .collect()
}

fn session_for(server: &ServerGuard) -> Session {
    let provider = GeminiProvider::with_base_url(
        "test_key".to_string(),
        server.url(),
        "gemini-2.0-flash".to_string(),
    );
    Session::new(Arc::new(provider))
}

#[tokio::test]
async fn test_named_dish_end_to_end() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_query(Matcher::UrlEncoded("alt".into(), "sse".into()))
        .match_body(Matcher::Regex(
            r"Create a CONCISE recipe for \*Butter Chicken\*".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse_body(&["Butter Chicken\n", "Time: 20 + 30 min\n", "Serves 4"]))
        .create_async()
        .await;

    let session = session_for(&server);
    let request = RecipeRequest::text()
        .dish(DishSelection::Named("Butter Chicken"))
        .dietary(DietaryPreference::None)
        .build()
        .unwrap();

    let recipe = session.generate(&request).await.unwrap();

    assert_eq!(recipe.text, "Butter Chicken\nTime: 20 + 30 min\nServes 4");
    assert_eq!(recipe.title(), "Butter Chicken");
    assert_eq!(session.recent_titles(), vec!["Butter Chicken"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_free_form_prompt_reaches_model() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r"Ingredients Available:\* chicken breast, tomatoes, basil".to_string()),
            Matcher::Regex(r"Cuisine Style:\* Italian".to_string()),
            Matcher::Regex(r"Meal Type:\* Dinner".to_string()),
        ]))
        .with_status(200)
        .with_body(sse_body(&["Chicken Caprese"]))
        .create_async()
        .await;

    let session = session_for(&server);
    let request = RecipeRequest::text()
        .ingredients(" chicken breast,tomatoes \n basil ")
        .cuisine(CuisineStyle::Italian)
        .meal_type(MealType::Dinner)
        .build()
        .unwrap();

    session.generate(&request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_image_end_to_end() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {"inlineData": {"mimeType": "image/jpeg", "data": "/9j/"}},
                    {"text": "Analyze this food image and create a SHORT recipe.\n\nAdditional Context: None provided\n\nPlease provide a CONCISE recipe with:\n1. Dish name\n2. Time: Prep + Cook (one line)\n3. Servings\n4. Ingredients: Brief list with measurements\n5. Instructions: Maximum 5-6 steps only\n6. One quick tip\n\nIMPORTANT: Keep response under 300 words. Be brief!"}
                ]
            }]
        })))
        .with_status(200)
        .with_body(sse_body(&["Gol Gappay\n", "Serves 2"]))
        .create_async()
        .await;

    let session = session_for(&server);
    let request = RecipeRequest::image(vec![0xff, 0xd8, 0xff]).build().unwrap();

    let recipe = session.generate(&request).await.unwrap();

    assert_eq!(recipe.title(), "Gol Gappay");
    assert_eq!(recipe.download_file_name(), "image_recipe.txt");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_validation_failure_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let session = session_for(&server);
    let text = RecipeRequest::Text(Default::default());
    let image = RecipeRequest::Image(recipe_lab::ImageRequest {
        data: Vec::new(),
        media_type: "image/png".to_string(),
        context: None,
    });

    assert!(session.generate(&text).await.unwrap_err().is_validation());
    assert!(session.generate(&image).await.unwrap_err().is_validation());
    assert!(session.history().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_failure_is_not_retried_or_recorded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"error": {"code": 403, "message": "Permission denied", "status": "PERMISSION_DENIED"}}"#)
        .expect(1)
        .create_async()
        .await;

    let session = session_for(&server);
    let request = RecipeRequest::text().ingredients("eggs").build().unwrap();

    let err = session.generate(&request).await.unwrap_err();

    assert!(matches!(err, RecipeError::Api { status: 403, .. }));
    assert!(session.history().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_stream_uses_placeholder_title() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let session = session_for(&server);
    let request = RecipeRequest::text().ingredients("lentils").build().unwrap();

    let recipe = session.generate(&request).await.unwrap();

    assert_eq!(recipe.text, "");
    assert_eq!(recipe.title(), "Generated Recipe");
    assert_eq!(session.recent_titles(), vec!["Generated Recipe"]);
}

#[tokio::test]
async fn test_history_shows_five_most_recent() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(sse_body(&["Pulao"]))
        .expect(6)
        .create_async()
        .await;

    let session = session_for(&server);
    for ingredient in ["rice", "peas", "carrots", "onion", "cumin", "stock"] {
        let request = RecipeRequest::text().ingredients(ingredient).build().unwrap();
        session.generate(&request).await.unwrap();
    }

    assert_eq!(session.history().len(), 6);
    assert_eq!(session.recent_titles().len(), 5);
}
