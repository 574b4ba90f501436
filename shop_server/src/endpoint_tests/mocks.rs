use mockall::mock;
use shop_common::{CapturedPayment, NewPaymentIntent, PaymentIntent, PaymentProvider, PaymentProviderError};
use shop_engine::{
    db_types::{NewOrder, NewProduct, Order, OrderWithProduct, Product, ProductId},
    traits::{CatalogError, CatalogManagement, OrderManagement, OrderStoreError},
};

mock! {
    pub Store {}
    impl CatalogManagement for Store {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
        async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, CatalogError>;
        async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogError>;
    }
    impl OrderManagement for Store {
        async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError>;
        async fn fetch_orders_with_products(&self) -> Result<Vec<OrderWithProduct>, OrderStoreError>;
    }
}

mock! {
    pub Provider {}
    impl PaymentProvider for Provider {
        async fn create_intent(&self, intent: NewPaymentIntent) -> Result<PaymentIntent, PaymentProviderError>;
        async fn capture_intent(&self, intent_id: &str) -> Result<CapturedPayment, PaymentProviderError>;
    }
}
