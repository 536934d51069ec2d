//! Beer service

use futures_util::stream::{BoxStream, StreamExt, TryStreamExt};
use tracing::debug;

use crate::model::{Beer, BeerDto};
use crate::store::{Repository, StoreResult};

use super::has_text;

/// Stream of beers in store order
pub type BeerStream = BoxStream<'static, StoreResult<BeerDto>>;

/// Beer operations over the beer collection
#[derive(Clone)]
pub struct BeerService {
    repository: Repository<Beer>,
}

impl BeerService {
    pub fn new(repository: Repository<Beer>) -> Self {
        Self { repository }
    }

    /// Persist a new beer. Client-supplied keys and timestamps are dropped.
    pub async fn create(&self, dto: BeerDto) -> StoreResult<BeerDto> {
        let beer = Beer {
            id: None,
            created_date: None,
            updated_date: None,
            ..Beer::from(dto)
        };

        let saved = self.repository.save(beer).await?;
        debug!(id = saved.id.as_deref(), "created beer");
        Ok(saved.into())
    }

    pub async fn get(&self, id: &str) -> StoreResult<Option<BeerDto>> {
        debug!(id, "fetching beer");
        Ok(self.repository.find_by_id(id).await?.map(BeerDto::from))
    }

    pub async fn list(&self) -> StoreResult<BeerStream> {
        debug!("listing beers");
        let beers = self.repository.find_all().await?;
        Ok(beers.map_ok(BeerDto::from).boxed())
    }

    /// Replace every mutable field of an existing beer.
    ///
    /// Resolves to `None` when no beer has `id`.
    pub async fn update(&self, id: &str, dto: BeerDto) -> StoreResult<Option<BeerDto>> {
        let Some(mut beer) = self.repository.find_by_id(id).await? else {
            debug!(id, "beer to update not found");
            return Ok(None);
        };

        replace_fields(&mut beer, dto);
        let saved = self.repository.save(beer).await?;
        debug!(id, "updated beer");
        Ok(Some(saved.into()))
    }

    /// Copy only the populated fields of `dto` onto an existing beer.
    ///
    /// Resolves to `None` when no beer has `id`.
    pub async fn patch(&self, id: &str, dto: BeerDto) -> StoreResult<Option<BeerDto>> {
        let Some(mut beer) = self.repository.find_by_id(id).await? else {
            debug!(id, "beer to patch not found");
            return Ok(None);
        };

        merge_fields(&mut beer, dto);
        let saved = self.repository.save(beer).await?;
        debug!(id, "patched beer");
        Ok(Some(saved.into()))
    }

    /// Delete by key; succeeds whether or not the beer existed
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.repository.delete_by_id(id).await?;
        debug!(id, "deleted beer");
        Ok(())
    }

    pub async fn find_first_by_name(&self, name: &str) -> StoreResult<Option<BeerDto>> {
        debug!(name, "finding first beer by name");
        Ok(self
            .repository
            .find_first_by(Beer::NAME_FIELD, name)
            .await?
            .map(BeerDto::from))
    }

    pub async fn find_all_by_style(&self, style: &str) -> StoreResult<BeerStream> {
        debug!(style, "finding beers by style");
        let beers = self.repository.find_all_by(Beer::STYLE_FIELD, style).await?;
        Ok(beers.map_ok(BeerDto::from).boxed())
    }
}

/// Full replace: key and timestamps are kept, everything else comes from `dto`
fn replace_fields(beer: &mut Beer, dto: BeerDto) {
    beer.beer_name = dto.beer_name;
    beer.beer_style = dto.beer_style;
    beer.upc = dto.upc;
    beer.quantity_on_hand = dto.quantity_on_hand;
    beer.price = dto.price;
}

/// Partial update: blank strings, absent values and negative quantities leave
/// the stored field alone
fn merge_fields(beer: &mut Beer, dto: BeerDto) {
    if has_text(&dto.beer_name) {
        beer.beer_name = dto.beer_name;
    }
    if has_text(&dto.beer_style) {
        beer.beer_style = dto.beer_style;
    }
    if has_text(&dto.upc) {
        beer.upc = dto.upc;
    }
    if matches!(dto.quantity_on_hand, Some(q) if q >= 0) {
        beer.quantity_on_hand = dto.quantity_on_hand;
    }
    if dto.price.is_some() {
        beer.price = dto.price;
    }
}
