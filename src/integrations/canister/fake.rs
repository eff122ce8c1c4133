// src/integrations/canister/fake.rs
//
// In-memory `EstateBackend` with the canister's semantics, for tests.
//
// Several handles can share one ledger, each acting as a different caller,
// the way several browser sessions share one canister.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candid::Principal;

use super::backend::{CallOutcome, EstateBackend};
use crate::domain::{
    Document, DocumentType, Property, PropertyStatus, PropertyToken, SettlementCurrency,
    TokenMetadata, Transaction, TransactionStatus,
};
use crate::error::{AppError, AppResult};

#[derive(Default)]
struct Ledger {
    properties: BTreeMap<u64, Property>,
    transactions: BTreeMap<u64, Transaction>,
    tokens: BTreeMap<u64, PropertyToken>,
    holdings: BTreeMap<Principal, Vec<u64>>,
    property_counter: u64,
    transaction_counter: u64,
    token_counter: u64,
    clock: u64,
}

impl Ledger {
    fn tick(&mut self) -> u64 {
        self.clock += 1_000_000_000;
        self.clock
    }
}

#[derive(Clone)]
pub struct InMemoryBackend {
    ledger: Arc<Mutex<Ledger>>,
    caller: Principal,
}

impl InMemoryBackend {
    pub fn new(caller: Principal) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(Ledger {
                clock: 1_700_000_000_000_000_000,
                ..Ledger::default()
            })),
            caller,
        }
    }

    /// Another handle on the same ledger, calling as `caller`
    pub fn as_caller(&self, caller: Principal) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            caller,
        }
    }

    pub fn caller(&self) -> Principal {
        self.caller
    }

    /// Tokenize an existing property: mint a token owned by the property
    /// owner and link it from the property record.
    pub fn tokenize(
        &self,
        property_id: u64,
        name: &str,
        total_supply: u64,
        price_per_token: u64,
        currency: SettlementCurrency,
    ) -> u64 {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.token_counter += 1;
        let token_id = ledger.token_counter;

        let property = ledger
            .properties
            .get_mut(&property_id)
            .expect("tokenize: unknown property");
        property.status = PropertyStatus::Tokenized;
        property.token_id = Some(token_id);
        let owner = property.owner;

        ledger.tokens.insert(
            token_id,
            PropertyToken {
                token_id,
                owner,
                metadata: TokenMetadata {
                    name: name.to_string(),
                    symbol: name.chars().take(3).collect::<String>().to_uppercase(),
                    description: None,
                    image: None,
                    royalties: None,
                    royalty_recipient: None,
                },
                property_id,
                total_supply,
                available_supply: total_supply,
                price_per_token,
                currency,
            },
        );
        ledger.holdings.entry(owner).or_default().push(token_id);
        token_id
    }

    /// Force a property's status, e.g. to simulate a backend-side delisting
    pub fn set_property_status(&self, property_id: u64, status: PropertyStatus) {
        let mut ledger = self.ledger.lock().unwrap();
        if let Some(property) = ledger.properties.get_mut(&property_id) {
            property.status = status;
        }
    }

    pub fn cancel_transaction(&self, transaction_id: u64) {
        let mut ledger = self.ledger.lock().unwrap();
        if let Some(tx) = ledger.transactions.get_mut(&transaction_id) {
            tx.status = TransactionStatus::Cancelled;
        }
    }
}

#[async_trait]
impl EstateBackend for InMemoryBackend {
    async fn get_all_properties(&self) -> AppResult<Vec<Property>> {
        let ledger = self.ledger.lock().unwrap();
        Ok(ledger.properties.values().cloned().collect())
    }

    async fn get_property(&self, property_id: u64) -> AppResult<Option<Property>> {
        let ledger = self.ledger.lock().unwrap();
        Ok(ledger.properties.get(&property_id).cloned())
    }

    async fn get_user_properties(&self, owner: Principal) -> AppResult<Vec<Property>> {
        let ledger = self.ledger.lock().unwrap();
        Ok(ledger
            .properties
            .values()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect())
    }

    async fn list_property(
        &self,
        price: f64,
        location: String,
        description: String,
    ) -> AppResult<Property> {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.property_counter += 1;
        let property = Property {
            id: ledger.property_counter,
            owner: self.caller,
            price,
            location,
            description,
            status: PropertyStatus::Available,
            nft_id: None,
            token_id: None,
            documents: Vec::new(),
        };
        ledger.properties.insert(property.id, property.clone());
        Ok(property)
    }

    async fn add_document(
        &self,
        property_id: u64,
        kind: DocumentType,
        content_hash: String,
    ) -> AppResult<bool> {
        let mut ledger = self.ledger.lock().unwrap();
        let timestamp = ledger.tick();
        let property = ledger
            .properties
            .get_mut(&property_id)
            .ok_or_else(|| AppError::Transport("Canister trapped: Property not found".into()))?;
        if property.owner != self.caller {
            return Err(AppError::Transport(
                "Canister trapped: Only the property owner can add documents".into(),
            ));
        }
        let id = property.documents.len() as u64;
        property.documents.push(Document {
            id,
            hash: content_hash,
            timestamp,
            kind,
        });
        Ok(true)
    }

    async fn assign_agent(&self, property_id: u64, agent: Principal) -> AppResult<bool> {
        let mut ledger = self.ledger.lock().unwrap();
        let property = ledger
            .properties
            .get_mut(&property_id)
            .ok_or_else(|| AppError::Transport("Canister trapped: Property not found".into()))?;
        property.owner = agent;
        Ok(true)
    }

    async fn initiate_transaction(&self, property_id: u64) -> AppResult<u64> {
        let mut ledger = self.ledger.lock().unwrap();
        let timestamp = ledger.tick();
        let property = ledger
            .properties
            .get(&property_id)
            .cloned()
            .ok_or_else(|| AppError::Transport("Canister trapped: Property not found".into()))?;
        if property.status != PropertyStatus::Available {
            return Err(AppError::Transport(
                "Canister trapped: Property is not available".into(),
            ));
        }

        ledger.transaction_counter += 1;
        let id = ledger.transaction_counter;
        ledger.transactions.insert(
            id,
            Transaction {
                id,
                property_id,
                buyer: self.caller,
                seller: property.owner,
                price: property.price,
                status: TransactionStatus::Pending,
                timestamp,
            },
        );
        if let Some(p) = ledger.properties.get_mut(&property_id) {
            p.status = PropertyStatus::UnderContract;
        }
        Ok(id)
    }

    async fn get_transaction(&self, transaction_id: u64) -> AppResult<Option<Transaction>> {
        let ledger = self.ledger.lock().unwrap();
        Ok(ledger.transactions.get(&transaction_id).cloned())
    }

    async fn complete_transaction(&self, transaction_id: u64) -> AppResult<bool> {
        let mut ledger = self.ledger.lock().unwrap();
        let Some(tx) = ledger.transactions.get(&transaction_id).cloned() else {
            return Ok(false);
        };
        if tx.seller != self.caller || tx.status != TransactionStatus::Pending {
            return Ok(false);
        }
        if let Some(p) = ledger.properties.get_mut(&tx.property_id) {
            p.status = PropertyStatus::Sold;
            p.owner = tx.buyer;
        }
        if let Some(t) = ledger.transactions.get_mut(&transaction_id) {
            t.status = TransactionStatus::Completed;
        }
        Ok(true)
    }

    async fn get_token(&self, token_id: u64) -> AppResult<Option<PropertyToken>> {
        let ledger = self.ledger.lock().unwrap();
        Ok(ledger.tokens.get(&token_id).cloned())
    }

    async fn get_user_tokens(&self, owner: Principal) -> AppResult<Vec<PropertyToken>> {
        let ledger = self.ledger.lock().unwrap();
        let ids = ledger.holdings.get(&owner).cloned().unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| ledger.tokens.get(id))
            .cloned()
            .collect())
    }

    async fn purchase_tokens(&self, token_id: u64, amount: u64) -> AppResult<CallOutcome> {
        let mut ledger = self.ledger.lock().unwrap();
        let caller = self.caller;
        let Some(token) = ledger.tokens.get_mut(&token_id) else {
            return Ok(CallOutcome::Rejected("Token not found".to_string()));
        };
        if token.available_supply < amount {
            return Ok(CallOutcome::Rejected(
                "Insufficient available supply".to_string(),
            ));
        }
        token.available_supply -= amount;
        let holding = ledger.holdings.entry(caller).or_default();
        if !holding.contains(&token_id) {
            holding.push(token_id);
        }
        Ok(CallOutcome::Accepted)
    }

    async fn distribute_token_income(
        &self,
        token_id: u64,
        _amount: u64,
        _use_usdt: bool,
    ) -> AppResult<CallOutcome> {
        let ledger = self.ledger.lock().unwrap();
        if !ledger.tokens.contains_key(&token_id) {
            return Ok(CallOutcome::Rejected("Token not found".to_string()));
        }
        Ok(CallOutcome::Accepted)
    }
}
