// src/application/commands/property_commands.rs
//
// Property Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs
// - Never contain business logic

use std::path::Path;

use crate::application::commands::parse_principal;
use crate::application::dto::*;
use crate::application::error_handling::{CommandResult, ErrorResponse, ToErrorResponse};
use crate::application::state::AppState;
use crate::domain::DocumentType;
use crate::services::{AddDocumentRequest, ListPropertyRequest};

/// List all properties
pub async fn list_properties(state: &AppState) -> CommandResult<Vec<PropertyDto>> {
    let properties = state
        .property_service
        .get_all_properties()
        .await
        .to_error_response("load properties")?;

    Ok(properties.into_iter().map(PropertyDto::from).collect())
}

/// Get a single property; unknown ids are `None`
pub async fn get_property(state: &AppState, property_id: u64) -> CommandResult<Option<PropertyDto>> {
    let property = state
        .property_service
        .get_property(property_id)
        .await
        .to_error_response("load property")?;

    Ok(property.map(PropertyDto::from))
}

pub async fn get_user_properties(state: &AppState, owner: &str) -> CommandResult<Vec<PropertyDto>> {
    let owner = parse_principal(owner)?;
    let properties = state
        .property_service
        .get_user_properties(owner)
        .await
        .to_error_response("load properties")?;

    Ok(properties.into_iter().map(PropertyDto::from).collect())
}

/// Properties owned by the logged-in user
pub async fn get_my_properties(state: &AppState) -> CommandResult<Vec<PropertyDto>> {
    let properties = state
        .property_service
        .get_my_properties()
        .await
        .to_error_response("load your properties")?;

    Ok(properties.into_iter().map(PropertyDto::from).collect())
}

pub async fn list_property(state: &AppState, dto: ListPropertyDto) -> CommandResult<PropertyDto> {
    let property = state
        .property_service
        .list_property(ListPropertyRequest {
            price: dto.price,
            location: dto.location,
            description: dto.description,
        })
        .await
        .to_error_response("list property")?;

    Ok(PropertyDto::from(property))
}

pub async fn add_document(state: &AppState, dto: AddDocumentDto) -> CommandResult<ActionOutcomeDto> {
    let kind = parse_document_type(&dto.kind)?;
    let added = state
        .property_service
        .add_document(AddDocumentRequest {
            property_id: dto.property_id,
            kind,
            content_hash: dto.content_hash,
        })
        .await
        .to_error_response("add document")?;

    Ok(document_outcome(added))
}

/// Hash a local file and attach it to a property
pub async fn add_document_from_file(
    state: &AppState,
    property_id: u64,
    kind: &str,
    path: &Path,
) -> CommandResult<ActionOutcomeDto> {
    let kind = parse_document_type(kind)?;
    let added = state
        .property_service
        .add_document_from_file(property_id, kind, path)
        .await
        .to_error_response("add document")?;

    Ok(document_outcome(added))
}

pub async fn assign_agent(
    state: &AppState,
    property_id: u64,
    agent: &str,
) -> CommandResult<ActionOutcomeDto> {
    let agent = parse_principal(agent)?;
    let assigned = state
        .property_service
        .assign_agent(property_id, agent)
        .await
        .to_error_response("assign agent")?;

    Ok(ActionOutcomeDto {
        success: assigned,
        message: if assigned {
            format!("Agent {} assigned to property {}", agent, property_id)
        } else {
            format!("Agent could not be assigned to property {}", property_id)
        },
    })
}

pub async fn search_properties(state: &AppState, query: &str) -> CommandResult<Vec<PropertyDto>> {
    let properties = state
        .property_service
        .search_properties(query)
        .await
        .to_error_response("search properties")?;

    Ok(properties.into_iter().map(PropertyDto::from).collect())
}

pub fn popular_searches(state: &AppState) -> Vec<String> {
    state
        .property_service
        .popular_searches()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn parse_document_type(kind: &str) -> CommandResult<DocumentType> {
    kind.parse::<DocumentType>()
        .map_err(|e| ErrorResponse::validation(e.to_string()))
}

fn document_outcome(added: bool) -> ActionOutcomeDto {
    ActionOutcomeDto {
        success: added,
        message: if added {
            "Document added".to_string()
        } else {
            "Document was not added".to_string()
        },
    }
}
