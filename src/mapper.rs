//! # Transfer Mapping
//!
//! Conversions between persisted records and transfer objects. Every field
//! maps one-to-one; absent values stay absent.

use crate::model::{Beer, BeerDto, Customer, CustomerDto};

impl From<Beer> for BeerDto {
    fn from(beer: Beer) -> Self {
        Self {
            id: beer.id,
            beer_name: beer.beer_name,
            beer_style: beer.beer_style,
            upc: beer.upc,
            quantity_on_hand: beer.quantity_on_hand,
            price: beer.price,
            created_date: beer.created_date,
            updated_date: beer.updated_date,
        }
    }
}

impl From<BeerDto> for Beer {
    fn from(dto: BeerDto) -> Self {
        Self {
            id: dto.id,
            beer_name: dto.beer_name,
            beer_style: dto.beer_style,
            upc: dto.upc,
            quantity_on_hand: dto.quantity_on_hand,
            price: dto.price,
            created_date: dto.created_date,
            updated_date: dto.updated_date,
        }
    }
}

impl From<Customer> for CustomerDto {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            created_date: customer.created_date,
            last_modified_date: customer.last_modified_date,
        }
    }
}

impl From<CustomerDto> for Customer {
    fn from(dto: CustomerDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            created_date: dto.created_date,
            last_modified_date: dto.last_modified_date,
        }
    }
}
