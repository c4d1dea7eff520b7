//! Full checkout journeys through the wired system.

use std::sync::Arc;

use rust_decimal::Decimal;
use storefront_core::api::mock::{MockOrderApi, MockPaymentApi, MockProfileApi, ScriptedWidget};
use storefront_core::model::{
    Address, AddressType, AuthState, CaseSize, PaymentMethod, Product, Role, User,
};
use storefront_core::payment::{
    CompletedPayment, GatewaySettings, PaymentOutcome, WidgetOutcome,
};
use storefront_core::runtime::StorefrontSystem;
use storefront_core::session::{self, MemoryStore, SessionSnapshot};

fn case(size: u32, offered: u32) -> CaseSize {
    CaseSize {
        size,
        price: Decimal::from(offered + 20),
        offered_price: Decimal::from(offered),
        is_default: true,
    }
}

fn product(id: &str, stock: u32, variant: &CaseSize) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        brand: None,
        images: vec![],
        stock,
        case_sizes: vec![variant.clone()],
    }
}

fn address(id: &str, is_default: bool) -> Address {
    Address {
        id: Some(id.to_string()),
        full_name: "Asha Rao".to_string(),
        phone: "9876543210".to_string(),
        address_type: AddressType::Home,
        street: "14 MG Road".to_string(),
        city: "Pune".to_string(),
        state: "Maharashtra".to_string(),
        country: "India".to_string(),
        postal_code: "411001".to_string(),
        is_default,
    }
}

fn buyer() -> User {
    User {
        id: "user_1".to_string(),
        username: "asha".to_string(),
        email: Some("asha@example.com".to_string()),
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        phone: "9876543210".to_string(),
        address: vec![address("addr_home", true), address("addr_work", false)],
        is_active: true,
        role: Role::Buyer,
    }
}

#[tokio::test]
async fn full_cod_checkout_journey() {
    let orders = Arc::new(MockOrderApi::succeeding());
    let system = StorefrontSystem::new(
        Arc::new(MockProfileApi::new(buyer())),
        orders.clone(),
        Arc::new(MockPaymentApi::succeeding()),
        Arc::new(ScriptedWidget::new()),
        GatewaySettings::new("rzp_test_key"),
    );
    let auth = AuthState::authenticated("jwt-token", buyer());

    // Fill the cart: 2 x 6-pack at 150 plus 1 single at 80 = 380, below the
    // free-shipping threshold.
    let six_pack = case(6, 150);
    let cookies = product("p_cookies", 30, &six_pack);
    system.cart_client.add(&cookies, &six_pack).await.unwrap();
    system.cart_client.add(&cookies, &six_pack).await.unwrap();

    let single = case(1, 80);
    let tea = product("p_tea", 10, &single);
    system.cart_client.add(&tea, &single).await.unwrap();

    let pricing = system.cart_client.pricing().await.unwrap();
    assert_eq!(pricing.total_items, 3);
    assert_eq!(pricing.order_total, Decimal::from(380u32));
    assert_eq!(pricing.to_pay, Decimal::from(420u32));

    // Walk the steps.
    system.checkout.advance_from_cart(&auth).unwrap();
    system.checkout.advance_from_select(Some("addr_work")).unwrap();

    let placed = system
        .checkout
        .place_order(&auth, PaymentMethod::Cod, Some("addr_work"))
        .await
        .unwrap();
    assert_eq!(placed.payment, PaymentOutcome::CashOnDelivery);

    let drafts = orders.drafts();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].total_amount, Decimal::from(420u32));
    assert_eq!(drafts[0].total_units, 13);
    assert_eq!(drafts[0].total_cases, 3);
    assert_eq!(
        drafts[0].shipping_address.address_id.as_deref(),
        Some("addr_work")
    );

    assert!(system.cart_client.lines().await.unwrap().is_empty());

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn full_online_checkout_journey() {
    let payments = Arc::new(MockPaymentApi::succeeding());
    let widget = Arc::new(ScriptedWidget::resolving(WidgetOutcome::Completed(
        CompletedPayment {
            razorpay_order_id: Some("rzp_order_1".to_string()),
            razorpay_payment_id: Some("pay_9".to_string()),
            razorpay_signature: Some("sig_9".to_string()),
        },
    )));
    let system = StorefrontSystem::new(
        Arc::new(MockProfileApi::new(buyer())),
        Arc::new(MockOrderApi::succeeding()),
        payments.clone(),
        widget.clone(),
        GatewaySettings::new("rzp_test_key"),
    );
    let auth = AuthState::authenticated("jwt-token", buyer());

    // 600 total: ships free.
    let six_pack = case(6, 600);
    let hamper = product("p_hamper", 12, &six_pack);
    system.cart_client.add(&hamper, &six_pack).await.unwrap();

    let pricing = system.cart_client.pricing().await.unwrap();
    assert_eq!(pricing.shipping, Decimal::ZERO);
    assert_eq!(pricing.to_pay, Decimal::from(600u32));

    let placed = system
        .checkout
        .place_order(&auth, PaymentMethod::OnlineTransfer, None)
        .await
        .unwrap();
    assert_eq!(placed.payment, PaymentOutcome::Verified);

    // The widget was charged the exact minor-unit amount against the
    // gateway handle, and the default address was resolved.
    let configs = widget.configs();
    assert_eq!(configs[0].amount_minor, 60_000);
    assert_eq!(configs[0].gateway_order_id, "rzp_order_1");

    let verified = payments.verified();
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].razorpay_signature, "sig_9");

    assert!(system.cart_client.lines().await.unwrap().is_empty());

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn session_snapshot_restores_the_cart_on_boot() {
    let store = MemoryStore::new();

    // A previous visit left a cart and a login behind.
    {
        let system = StorefrontSystem::new(
            Arc::new(MockProfileApi::new(buyer())),
            Arc::new(MockOrderApi::succeeding()),
            Arc::new(MockPaymentApi::succeeding()),
            Arc::new(ScriptedWidget::new()),
            GatewaySettings::new("rzp_test_key"),
        );

        let six_pack = case(6, 150);
        let cookies = product("p_cookies", 30, &six_pack);
        system.cart_client.add(&cookies, &six_pack).await.unwrap();

        let snapshot = SessionSnapshot {
            lines: system.cart_client.lines().await.unwrap(),
            token: Some("jwt-token".to_string()),
            user: Some(buyer()),
        };
        session::save_session(&store, &snapshot).unwrap();
        system.shutdown().await.unwrap();
    }

    // A fresh boot restores it.
    let system = StorefrontSystem::new(
        Arc::new(MockProfileApi::new(buyer())),
        Arc::new(MockOrderApi::succeeding()),
        Arc::new(MockPaymentApi::succeeding()),
        Arc::new(ScriptedWidget::new()),
        GatewaySettings::new("rzp_test_key"),
    );

    let snapshot = session::load_session(&store);
    assert!(snapshot.auth().is_authenticated());
    system.cart_client.restore(snapshot.lines).await.unwrap();

    let pricing = system.cart_client.pricing().await.unwrap();
    assert_eq!(pricing.total_items, 1);
    assert_eq!(pricing.order_total, Decimal::from(150u32));

    // The restored line still enforces its stock snapshot.
    assert!(system.cart_client.can_add_more("p_cookies", 6).await.unwrap());

    system.shutdown().await.unwrap();
}
