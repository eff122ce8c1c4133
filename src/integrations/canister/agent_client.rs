// src/integrations/canister/agent_client.rs
//
// `EstateBackend` over an `ic_agent::Agent`.
//
// Queries go through `Agent::query`, state-changing methods through
// `Agent::update(..).call_and_wait()`. Arguments are candid-encoded as a
// tuple in the canister's declared order; replies are decoded into the wire
// types of `candid_types` and mapped to domain types.

use async_trait::async_trait;
use candid::utils::ArgumentEncoder;
use candid::{decode_one, encode_args, CandidType, Deserialize, Principal};
use ic_agent::Agent;

use super::backend::{CallOutcome, EstateBackend};
use super::candid_types::{
    WireCallResult, WireDocumentType, WireProperty, WirePropertyToken, WireTransaction,
};
use crate::domain::{DocumentType, Property, PropertyToken, Transaction};
use crate::error::AppResult;

pub struct AgentBackend {
    agent: Agent,
    canister_id: Principal,
}

impl AgentBackend {
    pub fn new(agent: Agent, canister_id: Principal) -> Self {
        Self { agent, canister_id }
    }

    pub fn canister_id(&self) -> Principal {
        self.canister_id
    }

    async fn query<A, R>(&self, method: &str, args: A) -> AppResult<R>
    where
        A: ArgumentEncoder,
        R: CandidType + for<'de> Deserialize<'de>,
    {
        log::debug!("query {}.{}", self.canister_id, method);
        let bytes = self
            .agent
            .query(&self.canister_id, method)
            .with_arg(encode_args(args)?)
            .call()
            .await?;
        Ok(decode_one(&bytes)?)
    }

    async fn update<A, R>(&self, method: &str, args: A) -> AppResult<R>
    where
        A: ArgumentEncoder,
        R: CandidType + for<'de> Deserialize<'de>,
    {
        log::debug!("update {}.{}", self.canister_id, method);
        let bytes = self
            .agent
            .update(&self.canister_id, method)
            .with_arg(encode_args(args)?)
            .call_and_wait()
            .await?;
        Ok(decode_one(&bytes)?)
    }
}

#[async_trait]
impl EstateBackend for AgentBackend {
    async fn get_all_properties(&self) -> AppResult<Vec<Property>> {
        let properties: Vec<WireProperty> = self.query("get_all_properties", ()).await?;
        Ok(properties.into_iter().map(Property::from).collect())
    }

    async fn get_property(&self, property_id: u64) -> AppResult<Option<Property>> {
        let property: Option<WireProperty> =
            self.query("get_property", (property_id,)).await?;
        Ok(property.map(Property::from))
    }

    async fn get_user_properties(&self, owner: Principal) -> AppResult<Vec<Property>> {
        let properties: Vec<WireProperty> =
            self.query("get_user_properties", (owner,)).await?;
        Ok(properties.into_iter().map(Property::from).collect())
    }

    async fn list_property(
        &self,
        price: f64,
        location: String,
        description: String,
    ) -> AppResult<Property> {
        let property: WireProperty = self
            .update("list_property", (price, location, description))
            .await?;
        Ok(property.into())
    }

    async fn add_document(
        &self,
        property_id: u64,
        kind: DocumentType,
        content_hash: String,
    ) -> AppResult<bool> {
        let kind: WireDocumentType = kind.into();
        self.update("add_document", (property_id, kind, content_hash))
            .await
    }

    async fn assign_agent(&self, property_id: u64, agent: Principal) -> AppResult<bool> {
        self.update("assign_agent", (property_id, agent)).await
    }

    async fn initiate_transaction(&self, property_id: u64) -> AppResult<u64> {
        self.update("initiate_transaction", (property_id,)).await
    }

    async fn get_transaction(&self, transaction_id: u64) -> AppResult<Option<Transaction>> {
        let transaction: Option<WireTransaction> =
            self.query("get_transaction", (transaction_id,)).await?;
        Ok(transaction.map(Transaction::from))
    }

    async fn complete_transaction(&self, transaction_id: u64) -> AppResult<bool> {
        self.update("complete_transaction", (transaction_id,)).await
    }

    async fn get_token(&self, token_id: u64) -> AppResult<Option<PropertyToken>> {
        let token: Option<WirePropertyToken> = self.query("get_token", (token_id,)).await?;
        Ok(token.map(PropertyToken::from))
    }

    async fn get_user_tokens(&self, owner: Principal) -> AppResult<Vec<PropertyToken>> {
        let tokens: Vec<WirePropertyToken> = self.query("get_user_tokens", (owner,)).await?;
        Ok(tokens.into_iter().map(PropertyToken::from).collect())
    }

    async fn purchase_tokens(&self, token_id: u64, amount: u64) -> AppResult<CallOutcome> {
        let result: WireCallResult = self
            .update("purchase_tokens", (token_id, amount))
            .await?;
        Ok(result.into())
    }

    async fn distribute_token_income(
        &self,
        token_id: u64,
        amount: u64,
        use_usdt: bool,
    ) -> AppResult<CallOutcome> {
        let result: WireCallResult = self
            .update("distribute_token_income", (token_id, amount, use_usdt))
            .await?;
        Ok(result.into())
    }
}
