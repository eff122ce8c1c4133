// src/services/property_service.rs
//
// Property Service - Property Directory Access
//
// CRITICAL RULES:
// - Reads work with or without a session
// - Listing, documents and agent assignment require a session
// - The backend is the source of truth; nothing is cached here

use std::path::Path;
use std::sync::Arc;

use candid::Principal;
use log::info;
use sha2::{Digest, Sha256};

use crate::domain::{validate_listing_price, DocumentType, Property};
use crate::error::{AppError, AppResult};
use crate::events::{AgentAssigned, DocumentAdded, EventBus, PropertyListed};
use crate::services::SessionManager;

/// Suggestions shown under the dashboard search box
pub const POPULAR_SEARCHES: [&str; 6] = [
    "Houses for sale",
    "Apartments for rent",
    "Properties in Nairobi",
    "Condos for sale",
    "Office spaces",
    "Beachfront properties",
];

/// Request to list a new property
#[derive(Debug, Clone)]
pub struct ListPropertyRequest {
    pub price: f64,
    pub location: String,
    pub description: String,
}

/// Request to attach a document to a property
#[derive(Debug, Clone)]
pub struct AddDocumentRequest {
    pub property_id: u64,
    pub kind: DocumentType,
    pub content_hash: String,
}

pub struct PropertyService {
    session: Arc<SessionManager>,
    event_bus: Arc<EventBus>,
}

impl PropertyService {
    pub fn new(session: Arc<SessionManager>, event_bus: Arc<EventBus>) -> Self {
        Self { session, event_bus }
    }

    pub async fn get_all_properties(&self) -> AppResult<Vec<Property>> {
        self.session.reader().await?.get_all_properties().await
    }

    pub async fn get_property(&self, property_id: u64) -> AppResult<Option<Property>> {
        self.session.reader().await?.get_property(property_id).await
    }

    pub async fn get_user_properties(&self, owner: Principal) -> AppResult<Vec<Property>> {
        self.session.reader().await?.get_user_properties(owner).await
    }

    /// Properties owned by the logged-in principal
    pub async fn get_my_properties(&self) -> AppResult<Vec<Property>> {
        let owner = self.session.principal().ok_or(AppError::NotAuthenticated)?;
        self.get_user_properties(owner).await
    }

    /// List a property owned by the caller
    ///
    /// The backend assigns id, owner and initial status.
    pub async fn list_property(&self, request: ListPropertyRequest) -> AppResult<Property> {
        let backend = self.session.require_session()?;
        validate_listing_price(request.price)?;

        let property = backend
            .list_property(request.price, request.location, request.description)
            .await?;

        info!("Listed property {} at {}", property.id, property.location);
        self.event_bus.emit(PropertyListed::new(
            property.id,
            property.price,
            property.location.clone(),
        ));

        Ok(property)
    }

    pub async fn add_document(&self, request: AddDocumentRequest) -> AppResult<bool> {
        let backend = self.session.require_session()?;
        if request.content_hash.trim().is_empty() {
            return Err(AppError::Validation(
                "Document hash must not be empty".to_string(),
            ));
        }

        let added = backend
            .add_document(request.property_id, request.kind, request.content_hash.clone())
            .await?;

        if added {
            self.event_bus.emit(DocumentAdded::new(
                request.property_id,
                request.kind,
                request.content_hash,
            ));
        }
        Ok(added)
    }

    /// Hash a local file and attach it as a document
    pub async fn add_document_from_file(
        &self,
        property_id: u64,
        kind: DocumentType,
        path: &Path,
    ) -> AppResult<bool> {
        let content_hash = hash_file(path).await?;
        self.add_document(AddDocumentRequest {
            property_id,
            kind,
            content_hash,
        })
        .await
    }

    pub async fn assign_agent(&self, property_id: u64, agent: Principal) -> AppResult<bool> {
        let backend = self.session.require_session()?;
        let assigned = backend.assign_agent(property_id, agent).await?;

        if assigned {
            self.event_bus.emit(AgentAssigned::new(property_id, agent));
        }
        Ok(assigned)
    }

    /// Dashboard search over the full property set
    pub async fn search_properties(&self, query: &str) -> AppResult<Vec<Property>> {
        let properties = self.get_all_properties().await?;
        Ok(properties
            .into_iter()
            .filter(|p| p.matches_query(query))
            .collect())
    }

    pub fn popular_searches(&self) -> &'static [&'static str] {
        &POPULAR_SEARCHES
    }
}

/// Hex-encoded SHA-256 of a file's contents
pub async fn hash_file(path: &Path) -> AppResult<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
