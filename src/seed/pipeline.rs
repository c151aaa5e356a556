use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::config::CollectionIds;
use crate::error::SeedError;
use crate::logic::{check_subset_range, random_subset};
use crate::model::{
    to_attributes, Agent, Document, DocumentId, Facility, GalleryImage, Id, Property,
    PropertyType, Review,
};
use crate::seed::SeedAssets;
use crate::store::DocumentStore;

/// How many documents of each kind a run creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub agents: usize,
    pub reviews: usize,
    pub properties: usize,
    pub reviews_per_property: RangeInclusive<usize>,
    pub gallery_per_property: RangeInclusive<usize>,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            agents: 5,
            reviews: 20,
            properties: 20,
            reviews_per_property: 5..=7,
            gallery_per_property: 3..=8,
        }
    }
}

/// Ids of everything a successful run created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Documents deleted during the clear phase.
    pub cleared: usize,
    pub agents: Vec<Id>,
    pub reviews: Vec<Id>,
    pub galleries: Vec<Id>,
    pub properties: Vec<Id>,
}

/// Repopulates the listing collections with cross-referenced synthetic data.
///
/// Every store call is awaited before the next one is issued. The first
/// failure aborts the run; documents created before it are left in place.
pub struct SeedPipeline<S: ?Sized, R = StdRng> {
    store: Arc<S>,
    collections: CollectionIds,
    assets: SeedAssets,
    plan: SeedPlan,
    rng: R,
}

impl<S: DocumentStore + ?Sized> SeedPipeline<S, StdRng> {
    pub fn new(store: Arc<S>, collections: CollectionIds) -> Self {
        Self {
            store,
            collections,
            assets: SeedAssets::default(),
            plan: SeedPlan::default(),
            rng: StdRng::from_entropy(),
        }
    }
}

impl<S: DocumentStore + ?Sized, R: Rng> SeedPipeline<S, R> {
    pub fn with_assets(mut self, assets: SeedAssets) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_plan(mut self, plan: SeedPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_rng<R2: Rng>(self, rng: R2) -> SeedPipeline<S, R2> {
        SeedPipeline {
            store: self.store,
            collections: self.collections,
            assets: self.assets,
            plan: self.plan,
            rng,
        }
    }

    /// Use a reproducible random source.
    pub fn with_seed(self, seed: u64) -> SeedPipeline<S, ChaCha8Rng> {
        self.with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn collections(&self) -> &CollectionIds {
        &self.collections
    }

    pub fn plan(&self) -> &SeedPlan {
        &self.plan
    }

    /// Check everything that can be checked without touching the store.
    pub fn validate(&self) -> Result<(), SeedError> {
        let ids = &self.collections;
        if ids.database_id.trim().is_empty() {
            return Err(SeedError::Configuration("Missing database ID".to_string()));
        }
        for (name, id) in ["AGENT", "REVIEWS", "GALLERY", "PROPERTY"]
            .iter()
            .zip(ids.in_clear_order())
        {
            if id.trim().is_empty() {
                return Err(SeedError::Configuration(format!(
                    "Missing collection ID for {}",
                    name
                )));
            }
        }

        if self.plan.agents > 0 && self.assets.agent_avatars.is_empty() {
            return Err(SeedError::Configuration("agent avatar pool is empty".to_string()));
        }
        if self.plan.reviews > 0 && self.assets.review_avatars.is_empty() {
            return Err(SeedError::Configuration("review avatar pool is empty".to_string()));
        }

        if self.plan.properties > 0 {
            if self.plan.agents == 0 {
                return Err(SeedError::Configuration(
                    "properties need at least one agent".to_string(),
                ));
            }
            if self.assets.property_images.is_empty() {
                return Err(SeedError::Configuration(
                    "property image pool is empty".to_string(),
                ));
            }
            let reviews = &self.plan.reviews_per_property;
            check_subset_range(self.plan.reviews, *reviews.start(), *reviews.end())?;
            let gallery = &self.plan.gallery_per_property;
            check_subset_range(self.assets.gallery_images.len(), *gallery.start(), *gallery.end())?;
        }

        Ok(())
    }

    pub async fn run(&mut self) -> Result<SeedReport, SeedError> {
        self.validate()?;

        log::info!("Starting data seeding process...");
        log::info!("Database ID: {}", self.collections.database_id);

        let cleared = self.clear_collections().await?;
        log::info!("Cleared all existing data.");

        let agents = self.seed_agents().await?;
        let reviews = self.seed_reviews().await?;
        let galleries = self.seed_galleries().await?;
        let properties = self.seed_properties(&agents, &reviews, &galleries).await?;

        log::info!("Data seeding completed successfully.");
        Ok(SeedReport {
            cleared,
            agents,
            reviews,
            galleries,
            properties,
        })
    }

    /// Empty all four collections in declared order. Returns the number of
    /// documents deleted.
    pub async fn clear_collections(&self) -> Result<usize, SeedError> {
        let mut cleared = 0;
        for collection_id in self.collections.in_clear_order() {
            cleared += self.clear_collection(collection_id).await?;
        }
        Ok(cleared)
    }

    /// Listing is paged by the store, so keep listing until nothing comes back.
    async fn clear_collection(&self, collection_id: &str) -> Result<usize, SeedError> {
        let database_id = &self.collections.database_id;
        let mut deleted = 0;

        loop {
            let page = self
                .store
                .list_documents(database_id, collection_id, &[])
                .await
                .map_err(|e| SeedError::remote("list", collection_id, e))?;
            if page.is_empty() {
                break;
            }

            log::info!(
                "Clearing {} documents from collection {}",
                page.documents.len(),
                collection_id
            );
            for document in &page.documents {
                self.store
                    .delete_document(database_id, collection_id, &document.id)
                    .await
                    .map_err(|e| SeedError::remote("delete", collection_id, e))?;
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    pub async fn seed_agents(&mut self) -> Result<Vec<Id>, SeedError> {
        let collection_id = self.collections.agents.clone();
        let mut ids = Vec::with_capacity(self.plan.agents);

        for i in 1..=self.plan.agents {
            let agent = Agent {
                name: format!("Agent {}", i),
                email: format!("agent{}@example.com", i),
                avatar: pick(&mut self.rng, &self.assets.agent_avatars, "agent avatar")?,
            };
            let document = self.create(&collection_id, &agent).await?;
            log::debug!("Created agent {} with ID: {}", i, document.id);
            ids.push(document.id);
        }

        log::info!("Seeded {} agents.", ids.len());
        Ok(ids)
    }

    pub async fn seed_reviews(&mut self) -> Result<Vec<Id>, SeedError> {
        let collection_id = self.collections.reviews.clone();
        let mut ids = Vec::with_capacity(self.plan.reviews);

        for i in 1..=self.plan.reviews {
            let review = Review {
                name: format!("Reviewer {}", i),
                avatar: pick(&mut self.rng, &self.assets.review_avatars, "review avatar")?,
                review: format!("This is a review by Reviewer {}.", i),
                rating: self.rng.gen_range(1..=5),
            };
            let document = self.create(&collection_id, &review).await?;
            log::debug!("Created review {} with ID: {}", i, document.id);
            ids.push(document.id);
        }

        log::info!("Seeded {} reviews.", ids.len());
        Ok(ids)
    }

    /// One gallery document per configured gallery image.
    pub async fn seed_galleries(&mut self) -> Result<Vec<Id>, SeedError> {
        let collection_id = self.collections.galleries.clone();
        let images = self.assets.gallery_images.clone();
        let mut ids = Vec::with_capacity(images.len());

        for (i, image) in images.into_iter().enumerate() {
            let document = self.create(&collection_id, &GalleryImage { image }).await?;
            log::debug!("Created gallery {} with ID: {}", i + 1, document.id);
            ids.push(document.id);
        }

        log::info!("Seeded {} galleries.", ids.len());
        Ok(ids)
    }

    /// Create the listings, each referencing one of `agents`, a subset of
    /// `reviews` and a subset of `galleries`.
    pub async fn seed_properties(
        &mut self,
        agents: &[Id],
        reviews: &[Id],
        galleries: &[Id],
    ) -> Result<Vec<Id>, SeedError> {
        let collection_id = self.collections.properties.clone();
        let mut ids = Vec::with_capacity(self.plan.properties);

        for i in 1..=self.plan.properties {
            let property = self.synthesize_property(i, agents, reviews, galleries)?;
            log::debug!(
                "Property {} relationships: agent={:?} reviews={:?} galleries={:?}",
                i,
                property.agent,
                property.review,
                property.gallery
            );

            let document = self.create(&collection_id, &property).await?;
            log::debug!("Seeded property: {} with ID: {}", property.name, document.id);
            ids.push(document.id);
        }

        log::info!("Seeded {} properties.", ids.len());
        Ok(ids)
    }

    fn synthesize_property(
        &mut self,
        sequence: usize,
        agents: &[Id],
        reviews: &[Id],
        galleries: &[Id],
    ) -> Result<Property, SeedError> {
        let rng = &mut self.rng;

        let agent = pick(rng, agents, "agent")?;
        let review_range = &self.plan.reviews_per_property;
        let review = random_subset(rng, reviews, *review_range.start(), *review_range.end())?;
        let gallery_range = &self.plan.gallery_per_property;
        let gallery = random_subset(rng, galleries, *gallery_range.start(), *gallery_range.end())?;
        let facilities = random_subset(rng, &Facility::ALL, 1, Facility::ALL.len())?;
        let property_type = PropertyType::ALL[rng.gen_range(0..PropertyType::ALL.len())];

        let image = match self.assets.property_images.get(sequence) {
            Some(image) => image.clone(),
            None => pick(rng, &self.assets.property_images, "property image")?,
        };

        Ok(Property {
            name: format!("Property {}", sequence),
            property_type,
            description: format!("This is the description for Property {}.", sequence),
            address: format!("123 Property Street, City {}", sequence),
            geolocation: format!("192.168.1.{}, 192.168.1.{}", sequence, sequence),
            price: rng.gen_range(1000..=9999),
            area: rng.gen_range(500..=3499),
            bedrooms: rng.gen_range(1..=5),
            bathrooms: rng.gen_range(1..=5),
            rating: rng.gen_range(1..=5),
            facilities,
            image,
            agent: vec![agent],
            review,
            gallery,
        })
    }

    async fn create<T: Serialize>(&self, collection_id: &str, entity: &T) -> Result<Document, SeedError> {
        let data = to_attributes(entity).map_err(|e| SeedError::remote("encode", collection_id, e))?;
        self.store
            .create_document(&self.collections.database_id, collection_id, DocumentId::Unique, data)
            .await
            .map_err(|e| SeedError::remote("create", collection_id, e))
    }
}

fn pick<R: Rng>(rng: &mut R, pool: &[String], what: &str) -> Result<String, SeedError> {
    pool.choose(rng)
        .cloned()
        .ok_or_else(|| SeedError::Configuration(format!("no {} available", what)))
}
