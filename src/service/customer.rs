//! Customer service

use futures_util::stream::{BoxStream, StreamExt, TryStreamExt};
use tracing::debug;

use crate::model::{Customer, CustomerDto};
use crate::store::{Repository, StoreResult};

use super::has_text;

/// Stream of customers in store order
pub type CustomerStream = BoxStream<'static, StoreResult<CustomerDto>>;

/// Customer operations over the customer collection
#[derive(Clone)]
pub struct CustomerService {
    repository: Repository<Customer>,
}

impl CustomerService {
    pub fn new(repository: Repository<Customer>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, dto: CustomerDto) -> StoreResult<CustomerDto> {
        let customer = Customer {
            id: None,
            created_date: None,
            last_modified_date: None,
            ..Customer::from(dto)
        };

        let saved = self.repository.save(customer).await?;
        debug!(id = saved.id.as_deref(), "created customer");
        Ok(saved.into())
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<CustomerDto>> {
        debug!(id, "fetching customer");
        Ok(self.repository.find_by_id(id).await?.map(CustomerDto::from))
    }

    pub async fn list(&self) -> StoreResult<CustomerStream> {
        debug!("listing customers");
        let customers = self.repository.find_all().await?;
        Ok(customers.map_ok(CustomerDto::from).boxed())
    }

    pub async fn find_all_by_name(&self, name: &str) -> StoreResult<CustomerStream> {
        debug!(name, "finding customers by name");
        let customers = self
            .repository
            .find_all_by(Customer::NAME_FIELD, name)
            .await?;
        Ok(customers.map_ok(CustomerDto::from).boxed())
    }

    /// Replace the name of an existing customer and persist it
    pub async fn update(&self, id: &str, dto: CustomerDto) -> StoreResult<Option<CustomerDto>> {
        let Some(mut customer) = self.repository.find_by_id(id).await? else {
            debug!(id, "customer to update not found");
            return Ok(None);
        };

        replace_fields(&mut customer, dto);
        let saved = self.repository.save(customer).await?;
        debug!(id, "updated customer");
        Ok(Some(saved.into()))
    }

    /// Copy the name onto an existing customer when it has text
    pub async fn patch(&self, id: &str, dto: CustomerDto) -> StoreResult<Option<CustomerDto>> {
        let Some(mut customer) = self.repository.find_by_id(id).await? else {
            debug!(id, "customer to patch not found");
            return Ok(None);
        };

        merge_fields(&mut customer, dto);
        let saved = self.repository.save(customer).await?;
        debug!(id, "patched customer");
        Ok(Some(saved.into()))
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.repository.delete_by_id(id).await?;
        debug!(id, "deleted customer");
        Ok(())
    }
}

/// Full replace: key and timestamps are kept, the name comes from `dto`
fn replace_fields(customer: &mut Customer, dto: CustomerDto) {
    customer.name = dto.name;
}

/// Partial update: a blank or absent name leaves the stored one alone
fn merge_fields(customer: &mut Customer, dto: CustomerDto) {
    if has_text(&dto.name) {
        customer.name = dto.name;
    }
}
