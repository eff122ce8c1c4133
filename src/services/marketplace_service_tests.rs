// src/services/marketplace_service_tests.rs
//
// Marketplace Service Tests
//
// Purchases and distributions are guarded client-side; a guarded call must
// never reach the backend. Mocks assert that, the in-memory backend covers
// the end-to-end flows.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use candid::Principal;

    use crate::domain::{PropertyStatus, PropertyToken, SettlementCurrency, TokenMetadata};
    use crate::error::AppError;
    use crate::events::{register_session_handlers, EventBus};
    use crate::integrations::canister::fake::InMemoryBackend;
    use crate::integrations::canister::MockEstateBackend;
    use crate::integrations::{CallOutcome, EstateBackend};
    use crate::services::test_support::session_manager;
    use crate::services::{
        DistributeIncomeRequest, MarketplaceService, PurchaseTokensRequest, SessionManager,
    };

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    fn owner() -> Principal {
        Principal::from_text("aaaaa-aa").unwrap()
    }

    fn token(token_id: u64, available_supply: u64) -> PropertyToken {
        PropertyToken {
            token_id,
            owner: owner(),
            metadata: TokenMetadata {
                name: "Riverside".to_string(),
                symbol: "RIV".to_string(),
                description: None,
                image: None,
                royalties: Some(250),
                royalty_recipient: None,
            },
            property_id: 1,
            total_supply: 100,
            available_supply,
            price_per_token: 10,
            currency: SettlementCurrency::CkUsdt,
        }
    }

    async fn logged_in_with(
        backend: Arc<dyn EstateBackend>,
    ) -> (Arc<SessionManager>, MarketplaceService, Arc<EventBus>) {
        let (session, _, bus) = session_manager(backend);
        session.login().await.unwrap();
        let service = MarketplaceService::new(Arc::clone(&session), Arc::clone(&bus));
        (session, service, bus)
    }

    /// Owner lists and tokenizes one property; the service trades as the
    /// anonymous principal on the same ledger
    async fn market() -> (InMemoryBackend, u64, u64) {
        let owner_handle = InMemoryBackend::new(owner());
        let property = owner_handle
            .list_property(1_000_000.0, "Nairobi".into(), "Riverside apartments".into())
            .await
            .unwrap();
        let token_id = owner_handle.tokenize(
            property.id,
            "Riverside",
            100,
            10,
            SettlementCurrency::CkUsdt,
        );
        (owner_handle, property.id, token_id)
    }

    // ========================================================================
    // CLIENT-SIDE GUARDS
    // ========================================================================

    #[tokio::test]
    async fn test_purchase_over_available_supply_is_never_issued() {
        let mut mock = MockEstateBackend::new();
        mock.expect_get_token()
            .withf(|id| *id == 7)
            .returning(|id| Ok(Some(token(id, 3))));
        mock.expect_purchase_tokens().never();

        let (_, service, _) = logged_in_with(Arc::new(mock)).await;

        let err = service
            .purchase_tokens(PurchaseTokensRequest {
                token_id: 7,
                amount: 5,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Invalid purchase amount"));
    }

    #[tokio::test]
    async fn test_purchase_of_zero_is_never_issued() {
        let mut mock = MockEstateBackend::new();
        mock.expect_get_token().returning(|id| Ok(Some(token(id, 3))));
        mock.expect_purchase_tokens().never();

        let (_, service, _) = logged_in_with(Arc::new(mock)).await;

        let err = service
            .purchase_tokens(PurchaseTokensRequest {
                token_id: 7,
                amount: 0,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid purchase amount");
    }

    #[tokio::test]
    async fn test_zero_distribution_is_never_issued() {
        let mut mock = MockEstateBackend::new();
        mock.expect_distribute_token_income().never();

        let (_, service, _) = logged_in_with(Arc::new(mock)).await;

        let err = service
            .distribute_token_income(DistributeIncomeRequest {
                token_id: 3,
                amount: 0,
                use_usdt: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Invalid distribution amount"));
    }

    #[tokio::test]
    async fn test_trading_requires_session() {
        let mut mock = MockEstateBackend::new();
        mock.expect_purchase_tokens().never();
        mock.expect_distribute_token_income().never();
        let (session, _, bus) = session_manager(Arc::new(mock));
        let service = MarketplaceService::new(session, bus);

        assert!(matches!(
            service
                .purchase_tokens(PurchaseTokensRequest {
                    token_id: 1,
                    amount: 1
                })
                .await,
            Err(AppError::NotAuthenticated)
        ));
        assert!(matches!(
            service
                .distribute_token_income(DistributeIncomeRequest {
                    token_id: 1,
                    amount: 1,
                    use_usdt: false
                })
                .await,
            Err(AppError::NotAuthenticated)
        ));
    }

    // ========================================================================
    // BACKEND RESULTS
    // ========================================================================

    #[tokio::test]
    async fn test_rejection_text_is_surfaced_verbatim() {
        let mut mock = MockEstateBackend::new();
        mock.expect_get_token().returning(|id| Ok(Some(token(id, 50))));
        mock.expect_purchase_tokens()
            .times(1)
            .returning(|_, _| Ok(CallOutcome::Rejected("Insufficient funds".to_string())));

        let (_, service, _) = logged_in_with(Arc::new(mock)).await;

        let err = service
            .purchase_tokens(PurchaseTokensRequest {
                token_id: 2,
                amount: 5,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Rejected(ref msg) if msg == "Insufficient funds"));
    }

    #[tokio::test]
    async fn test_empty_rejection_gets_generic_message() {
        let mut mock = MockEstateBackend::new();
        mock.expect_distribute_token_income()
            .returning(|_, _, _| Ok(CallOutcome::Rejected(String::new())));

        let (_, service, _) = logged_in_with(Arc::new(mock)).await;

        let err = service
            .distribute_token_income(DistributeIncomeRequest {
                token_id: 3,
                amount: 10,
                use_usdt: true,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to distribute income");
    }

    #[tokio::test]
    async fn test_distribution_passes_currency_flag() {
        let mut mock = MockEstateBackend::new();
        mock.expect_distribute_token_income()
            .withf(|token_id, amount, use_usdt| *token_id == 3 && *amount == 10 && *use_usdt)
            .times(1)
            .returning(|_, _, _| Ok(CallOutcome::Accepted));

        let (_, service, bus) = logged_in_with(Arc::new(mock)).await;

        service
            .distribute_token_income(DistributeIncomeRequest {
                token_id: 3,
                amount: 10,
                use_usdt: true,
            })
            .await
            .unwrap();
        assert_eq!(
            bus.get_event_log().last().unwrap().event_type,
            "IncomeDistributed"
        );
    }

    // ========================================================================
    // END-TO-END FLOWS
    // ========================================================================

    #[tokio::test]
    async fn test_discovery_lists_tokenized_properties_with_supply() {
        let (owner_handle, property_id, token_id) = market().await;

        // An untokenized property never shows up
        owner_handle
            .list_property(5.0, "Mombasa".into(), "Plot".into())
            .await
            .unwrap();

        let buyer = owner_handle.as_caller(Principal::anonymous());
        let (_, service, _) = logged_in_with(Arc::new(buyer)).await;

        let tokens = service.discover_available_tokens().await.unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_id, token_id);
        assert_eq!(tokens[0].property_id, property_id);

        // Delisted on the backend: gone from discovery
        owner_handle.set_property_status(property_id, PropertyStatus::Sold);
        assert!(service.discover_available_tokens().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sold_out_tokens_are_not_available() {
        let (owner_handle, _, token_id) = market().await;
        let buyer = owner_handle.as_caller(Principal::anonymous());
        let (_, service, _) = logged_in_with(Arc::new(buyer)).await;

        service
            .purchase_tokens(PurchaseTokensRequest {
                token_id,
                amount: 100,
            })
            .await
            .unwrap();

        assert!(service.discover_available_tokens().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_purchase_reloads_with_decreased_supply() {
        let (owner_handle, _, token_id) = market().await;
        let buyer = owner_handle.as_caller(Principal::anonymous());
        let (_, service, bus) = logged_in_with(Arc::new(buyer)).await;

        let before = service.load_marketplace().await.unwrap();
        assert_eq!(before.available[0].available_supply, 100);
        assert!(before.held.is_empty());

        let receipt = service
            .purchase_tokens(PurchaseTokensRequest {
                token_id,
                amount: 30,
            })
            .await
            .unwrap();
        assert_eq!(receipt.message, "Successfully purchased 30 tokens!");

        let after = service.cached_snapshot().unwrap();
        assert_eq!(after.available[0].available_supply, 70);
        assert_eq!(after.held.len(), 1);
        assert_eq!(after.held[0].token_id, token_id);

        // A full reload agrees with the cache
        assert_eq!(service.load_marketplace().await.unwrap(), after);

        let events: Vec<String> = bus
            .get_event_log()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert!(events.contains(&"TokensPurchased".to_string()));
    }

    #[tokio::test]
    async fn test_cached_record_guards_purchase() {
        let (owner_handle, _, token_id) = market().await;
        let buyer = owner_handle.as_caller(Principal::anonymous());
        let (_, service, _) = logged_in_with(Arc::new(buyer)).await;

        service.load_marketplace().await.unwrap();

        let err = service
            .purchase_tokens(PurchaseTokensRequest {
                token_id,
                amount: 101,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Nothing was bought
        let token = owner_handle.get_token(token_id).await.unwrap().unwrap();
        assert_eq!(token.available_supply, 100);
    }

    #[tokio::test]
    async fn test_unknown_token_is_left_to_backend() {
        let (owner_handle, _, _) = market().await;
        let buyer = owner_handle.as_caller(Principal::anonymous());
        let (_, service, _) = logged_in_with(Arc::new(buyer)).await;

        let err = service
            .purchase_tokens(PurchaseTokensRequest {
                token_id: 99,
                amount: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Rejected(ref msg) if msg == "Token not found"));
    }

    #[tokio::test]
    async fn test_anonymous_load_has_no_holdings() {
        let (owner_handle, _, _) = market().await;
        let (session, _, bus) = session_manager(Arc::new(owner_handle.as_caller(Principal::anonymous())));
        let service = MarketplaceService::new(session, bus);

        let snapshot = service.load_marketplace().await.unwrap();
        assert_eq!(snapshot.available.len(), 1);
        assert!(snapshot.held.is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_cached_listing() {
        let (owner_handle, _, _) = market().await;
        let buyer = owner_handle.as_caller(Principal::anonymous());
        let (session, _, bus) = session_manager(Arc::new(buyer));
        let service = Arc::new(MarketplaceService::new(
            Arc::clone(&session),
            Arc::clone(&bus),
        ));
        register_session_handlers(&bus, Arc::clone(&service));

        session.login().await.unwrap();
        service.load_marketplace().await.unwrap();
        assert!(service.cached_snapshot().is_some());

        session.logout().unwrap();
        assert!(service.cached_snapshot().is_none());
    }

    #[tokio::test]
    async fn test_property_reads_are_stable_without_writes() {
        let (owner_handle, _, _) = market().await;

        let first = owner_handle.get_all_properties().await.unwrap();
        let second = owner_handle.get_all_properties().await.unwrap();
        assert_eq!(first, second);
    }
}
