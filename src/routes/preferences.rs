use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{AcceptCuisinesRequest, MealType, MealTypeRequest, PreferencesResponse, RejectCuisinesRequest};
use crate::routes::{bad_request, AppState};

/// Configure wizard preference routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/cuisines/reject", web::post().to(reject_cuisines))
        .route("/cuisines/accept", web::post().to(accept_cuisines))
        .route("/preferences/meal-type", web::post().to(set_meal_type))
        .route("/preferences/{user_id}", web::get().to(get_preferences))
        .route("/preferences/{user_id}", web::delete().to(clear_preferences));
}

/// Reject cuisines endpoint
///
/// POST /api/v1/cuisines/reject
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "rejectedCuisines": ["Thai", "Korean"]
/// }
/// ```
async fn reject_cuisines(
    state: web::Data<AppState>,
    req: web::Json<RejectCuisinesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let preferences = state
        .preferences
        .reject(&req.user_id, &req.rejected_cuisines)
        .await;

    HttpResponse::Ok().json(PreferencesResponse {
        success: true,
        preferences,
    })
}

/// Accept cuisines endpoint
///
/// POST /api/v1/cuisines/accept
async fn accept_cuisines(
    state: web::Data<AppState>,
    req: web::Json<AcceptCuisinesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let preferences = state
        .preferences
        .accept(&req.user_id, &req.accepted_cuisines)
        .await;

    HttpResponse::Ok().json(PreferencesResponse {
        success: true,
        preferences,
    })
}

/// Record the meal type picked in the first wizard step
///
/// POST /api/v1/preferences/meal-type
async fn set_meal_type(
    state: web::Data<AppState>,
    req: web::Json<MealTypeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let meal_type = match req.meal_type.parse::<MealType>() {
        Ok(meal_type) => meal_type,
        Err(e) => return bad_request("Invalid meal type", e),
    };

    let preferences = state.preferences.set_meal_type(&req.user_id, meal_type).await;

    HttpResponse::Ok().json(PreferencesResponse {
        success: true,
        preferences,
    })
}

/// GET /api/v1/preferences/{user_id}
async fn get_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();
    let preferences = state.preferences.get(&user_id).await;

    HttpResponse::Ok().json(serde_json::json!({
        "userId": user_id,
        "preferences": preferences,
    }))
}

/// DELETE /api/v1/preferences/{user_id}
async fn clear_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();
    let removed = state.preferences.clear(&user_id).await;

    tracing::info!("Cleared preferences for {} (existed: {})", user_id, removed);

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "removed": removed,
    }))
}
