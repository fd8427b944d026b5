use crate::api::AppState;
use crate::error::Result;
use crate::ml::{SeverityLabel, SymptomQuery, TrainingReport};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

/// Self-documentation of the two operational endpoints
pub async fn index() -> Json<Value> {
    Json(json!({
        "model_creation": {
            "url": "/model-creation",
            "method": "GET",
        },
        "prediction": {
            "url": "/prediction",
            "method": "GET",
            "parameters": "fever, tiredness, dry_cough, difficulty_in_breathing, \
sore_throat, pains, nasal_congestion, runny_nose, diarrhea, contact_patient, age, gender",
        },
    }))
}

/// Retrain from the dataset file and overwrite the persisted model
pub async fn create_model(State(state): State<AppState>) -> Result<Json<TrainingReport>> {
    let report = state.service.train()?;
    Ok(Json(report))
}

/// Predict a severity label for the query parameters
pub async fn predict(
    State(state): State<AppState>,
    Query(query): Query<SymptomQuery>,
) -> Result<Json<PredictionResponse>> {
    let result = state.service.predict(&query)?;
    Ok(Json(PredictionResponse { result }))
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub result: SeverityLabel,
}
