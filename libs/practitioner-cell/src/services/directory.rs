// libs/practitioner-cell/src/services/directory.rs
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;
use chrono::Utc;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    Practitioner, Department, CreatePractitionerRequest, UpdatePractitionerRequest,
    DirectoryError,
};

/// Directory of practitioners and departments. The reservation workflow only
/// consumes the lookups; the mutating operations back the administration UI.
pub struct DirectoryService {
    supabase: SupabaseClient,
}

impl DirectoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn get_practitioner(
        &self,
        practitioner_id: Uuid,
        auth_token: &str,
    ) -> Result<Practitioner, DirectoryError> {
        debug!("Fetching practitioner: {}", practitioner_id);

        let path = format!("/rest/v1/practitioners?id=eq.{}", practitioner_id);
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(DirectoryError::PractitionerNotFound);
        }

        serde_json::from_value(result[0].clone())
            .map_err(|e| DirectoryError::DatabaseError(format!("Failed to parse practitioner: {}", e)))
    }

    pub async fn list_practitioners(
        &self,
        auth_token: &str,
    ) -> Result<Vec<Practitioner>, DirectoryError> {
        let path = "/rest/v1/practitioners?order=name.asc";
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            path,
            Some(auth_token),
            None,
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        result.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Practitioner>, _>>()
            .map_err(|e| DirectoryError::DatabaseError(format!("Failed to parse practitioners: {}", e)))
    }

    pub async fn create_practitioner(
        &self,
        request: CreatePractitionerRequest,
        auth_token: &str,
    ) -> Result<Practitioner, DirectoryError> {
        let now = Utc::now();
        let practitioner_data = json!({
            "name": request.name,
            "specialty": request.specialty,
            "phone": request.phone,
            "email": request.email,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339()
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Prefer", reqwest::header::HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/practitioners",
            Some(auth_token),
            Some(practitioner_data),
            Some(headers),
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(DirectoryError::DatabaseError("Failed to create practitioner".to_string()));
        }

        let practitioner: Practitioner = serde_json::from_value(result[0].clone())
            .map_err(|e| DirectoryError::DatabaseError(format!("Failed to parse created practitioner: {}", e)))?;

        info!("Practitioner created: {}", practitioner.id);
        Ok(practitioner)
    }

    pub async fn update_practitioner(
        &self,
        practitioner_id: Uuid,
        request: UpdatePractitionerRequest,
        auth_token: &str,
    ) -> Result<Practitioner, DirectoryError> {
        // Confirm the row exists so a stale id surfaces as not-found, not as
        // an empty update.
        self.get_practitioner(practitioner_id, auth_token).await?;

        let mut update_data = serde_json::Map::new();
        if let Some(name) = request.name {
            update_data.insert("name".to_string(), json!(name));
        }
        if let Some(specialty) = request.specialty {
            update_data.insert("specialty".to_string(), json!(specialty));
        }
        if let Some(phone) = request.phone {
            update_data.insert("phone".to_string(), json!(phone));
        }
        if let Some(email) = request.email {
            update_data.insert("email".to_string(), json!(email));
        }
        update_data.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = format!("/rest/v1/practitioners?id=eq.{}", practitioner_id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Prefer", reqwest::header::HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            Some(auth_token),
            Some(Value::Object(update_data)),
            Some(headers),
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(DirectoryError::DatabaseError("Failed to update practitioner".to_string()));
        }

        serde_json::from_value(result[0].clone())
            .map_err(|e| DirectoryError::DatabaseError(format!("Failed to parse updated practitioner: {}", e)))
    }

    /// Delete a practitioner. Refused while any booked reservation still
    /// references them, so history and availability state stay coherent.
    pub async fn delete_practitioner(
        &self,
        practitioner_id: Uuid,
        auth_token: &str,
    ) -> Result<(), DirectoryError> {
        self.get_practitioner(practitioner_id, auth_token).await?;

        let active_path = format!(
            "/rest/v1/reservations?practitioner_id=eq.{}&status=eq.booked&limit=1",
            practitioner_id
        );
        let active: Vec<Value> = self.supabase.request(
            Method::GET,
            &active_path,
            Some(auth_token),
            None,
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        if !active.is_empty() {
            return Err(DirectoryError::HasActiveReservations);
        }

        let path = format!("/rest/v1/practitioners?id=eq.{}", practitioner_id);
        let _: Vec<Value> = self.supabase.request(
            Method::DELETE,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        info!("Practitioner deleted: {}", practitioner_id);
        Ok(())
    }

    pub async fn get_department(
        &self,
        department_id: Uuid,
        auth_token: &str,
    ) -> Result<Department, DirectoryError> {
        let path = format!("/rest/v1/departments?id=eq.{}", department_id);
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(DirectoryError::DepartmentNotFound);
        }

        serde_json::from_value(result[0].clone())
            .map_err(|e| DirectoryError::DatabaseError(format!("Failed to parse department: {}", e)))
    }

    pub async fn list_departments(
        &self,
        auth_token: &str,
    ) -> Result<Vec<Department>, DirectoryError> {
        let path = "/rest/v1/departments?order=name.asc";
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            path,
            Some(auth_token),
            None,
        ).await.map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        result.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Department>, _>>()
            .map_err(|e| DirectoryError::DatabaseError(format!("Failed to parse departments: {}", e)))
    }
}
