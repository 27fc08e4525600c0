//! In-memory marketplace used by command tests.

use crate::error::{HubError, HubResult};
use crate::hub::{HubApi, ImportRecord, NewImport, NewProduct, Product, ProductUpdate, UserProfile};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock marketplace that keeps products and imports in memory and records every call.
pub struct MockHub {
    products: Mutex<Vec<Product>>,
    imports: Mutex<Vec<ImportRecord>>,
    calls: Mutex<Vec<String>>,
    should_fail: bool,
}

impl MockHub {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            imports: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            should_fail: false,
        }
    }

    pub fn with_imports(self, imports: Vec<ImportRecord>) -> Self {
        *self.imports.lock().unwrap() = imports;
        self
    }

    pub fn failing() -> Self {
        Self { should_fail: true, ..Self::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    pub fn imports(&self) -> Vec<ImportRecord> {
        self.imports.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> HubResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.should_fail {
            return Err(HubError::Status {
                status: 500,
                message: "Simulated server error".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(what: &str) -> HubError {
    HubError::Status { status: 404, message: format!("{} not found", what) }
}

#[async_trait]
impl HubApi for MockHub {
    async fn list_products(&self) -> HubResult<Vec<Product>> {
        self.record("GET /products".to_string())?;
        Ok(self.products())
    }

    async fn latest_products(&self) -> HubResult<Vec<Product>> {
        self.record("GET /products/latest".to_string())?;
        Ok(self.products().into_iter().take(6).collect())
    }

    async fn product(&self, id: &str) -> HubResult<Product> {
        self.record(format!("GET /products/{}", id))?;
        self.products().into_iter().find(|p| p.id == id).ok_or_else(|| not_found("Product"))
    }

    async fn create_product(&self, product: &NewProduct) -> HubResult<()> {
        self.record("POST /products".to_string())?;
        let mut products = self.products.lock().unwrap();
        let id = format!("new{}", products.len() + 1);
        products.push(Product {
            id,
            name: product.name.clone(),
            image_url: Some(product.image_url.clone()),
            price: product.price,
            origin_country: product.origin_country.clone(),
            rating: product.rating,
            available_quantity: product.available_quantity,
            category: product.category.clone(),
            description: product.description.clone(),
            created_at: Some("2025-06-30T00:00:00Z".to_string()),
            user_email: product.user_email.clone(),
        });
        Ok(())
    }

    async fn update_product(&self, id: &str, update: &ProductUpdate) -> HubResult<()> {
        self.record(format!("PATCH /products/{}", id))?;
        let mut products = self.products.lock().unwrap();
        let product = products.iter_mut().find(|p| p.id == id).ok_or_else(|| not_found("Product"))?;

        if let Some(name) = &update.name {
            product.name = name.clone();
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(rating) = update.rating {
            product.rating = rating;
        }
        if let Some(quantity) = update.available_quantity {
            product.available_quantity = quantity;
        }
        if let Some(country) = &update.origin_country {
            product.origin_country = country.clone();
        }
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> HubResult<()> {
        self.record(format!("DELETE /products/{}", id))?;
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(not_found("Product"));
        }
        Ok(())
    }

    async fn create_import(&self, import: &NewImport) -> HubResult<()> {
        self.record("POST /imports".to_string())?;
        {
            let mut products = self.products.lock().unwrap();
            let product = products
                .iter_mut()
                .find(|p| p.id == import.product_id)
                .ok_or_else(|| not_found("Product"))?;
            product.available_quantity =
                product.available_quantity.saturating_sub(import.imported_quantity);
        }

        let mut imports = self.imports.lock().unwrap();
        let id = format!("imp{}", imports.len() + 1);
        imports.push(ImportRecord {
            id,
            product_id: import.product_id.clone(),
            imported_quantity: import.imported_quantity,
            user_email: import.user_email.clone(),
            product_name: import.product_name.clone(),
            price: import.price,
            rating: import.rating,
            origin_country: import.origin_country.clone(),
            image_url: import.image_url.clone(),
            imported_at: Some("2025-07-01T00:00:00Z".to_string()),
        });
        Ok(())
    }

    async fn delete_import(&self, id: &str) -> HubResult<()> {
        self.record(format!("DELETE /imports/{}", id))?;
        let mut imports = self.imports.lock().unwrap();
        let before = imports.len();
        imports.retain(|i| i.id != id);
        if imports.len() == before {
            return Err(not_found("Import"));
        }
        Ok(())
    }

    async fn my_imports(&self, email: &str) -> HubResult<Vec<ImportRecord>> {
        self.record(format!("GET /my-imports/{}", email))?;
        Ok(self.imports().into_iter().filter(|i| i.user_email == email).collect())
    }

    async fn my_exports(&self, email: &str) -> HubResult<Vec<Product>> {
        self.record(format!("GET /my-exports/{}", email))?;
        Ok(self
            .products()
            .into_iter()
            .filter(|p| p.user_email.as_deref() == Some(email))
            .collect())
    }

    async fn register_user(&self, profile: &UserProfile) -> HubResult<()> {
        self.record(format!("POST /users {}", profile.email))
    }
}

/// Builds a product with the given id, name, price and stock.
pub fn make_product(id: &str, name: &str, price: f64, available: u64) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        image_url: None,
        price,
        origin_country: "Brazil".to_string(),
        rating: 4.0,
        available_quantity: available,
        category: None,
        description: None,
        created_at: None,
        user_email: None,
    }
}

/// Builds an import record owned by `email`.
pub fn make_import(id: &str, email: &str, price: f64, quantity: u64) -> ImportRecord {
    ImportRecord {
        id: id.to_string(),
        product_id: format!("product-{}", id),
        imported_quantity: quantity,
        user_email: email.to_string(),
        product_name: format!("Import {}", id),
        price,
        rating: 4.0,
        origin_country: "Chile".to_string(),
        image_url: None,
        imported_at: None,
    }
}
