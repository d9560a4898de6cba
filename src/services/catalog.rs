use crate::{
    db::DbPool,
    entities::material::{self, Entity as Material},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMaterialRequest {
    #[validate(length(min = 1))]
    pub owner: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub material_code: String,
    #[serde(default)]
    pub size: i32,
    pub unit_price: Decimal,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMaterialRequest {
    pub owner: Option<String>,
    pub category: Option<String>,
    pub company: Option<String>,
    pub name: Option<String>,
    pub material_code: Option<String>,
    pub size: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct MaterialFilter {
    pub category: Option<String>,
    pub company: Option<String>,
    pub material_name: Option<String>,
    pub material_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MaterialListResponse {
    #[schema(value_type = Vec<Object>)]
    pub materials: Vec<material::Model>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

/// `{label, value}` projection for form pickers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MaterialOption {
    pub label: String,
    pub value: Uuid,
}

/// Catalog of promotional material: reference data read by every ledger
/// operation for enrichment, mutated only through administrative edits.
#[derive(Clone)]
pub struct StockCatalogService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl StockCatalogService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, request), fields(material_code = %request.material_code))]
    pub async fn create(
        &self,
        request: CreateMaterialRequest,
    ) -> Result<material::Model, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();

        let model = material::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner: Set(request.owner),
            category: Set(request.category),
            company: Set(request.company),
            name: Set(request.name),
            material_code: Set(request.material_code),
            size: Set(request.size),
            unit_price: Set(request.unit_price),
            image: Set(request.image),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };

        let created = model.insert(db).await?;
        info!(material_id = %created.id, "Material created");

        if let Err(e) = self
            .event_sender
            .send(Event::MaterialCreated(created.id))
            .await
        {
            warn!(error = %e, "Failed to send material created event");
        }

        Ok(created)
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateMaterialRequest,
    ) -> Result<material::Model, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;

        let existing = Material::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Material {} not found", id)))?;

        let mut active: material::ActiveModel = existing.into();
        if let Some(owner) = request.owner {
            active.owner = Set(owner);
        }
        if let Some(category) = request.category {
            active.category = Set(category);
        }
        if let Some(company) = request.company {
            active.company = Set(company);
        }
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(code) = request.material_code {
            active.material_code = Set(code);
        }
        if let Some(size) = request.size {
            active.size = Set(size);
        }
        if let Some(price) = request.unit_price {
            active.unit_price = Set(price);
        }
        if let Some(image) = request.image {
            active.image = Set(Some(image));
        }
        active.updated_at = Set(Some(Utc::now()));

        let updated = active.update(db).await?;

        if let Err(e) = self
            .event_sender
            .send(Event::MaterialUpdated(updated.id))
            .await
        {
            warn!(error = %e, "Failed to send material updated event");
        }

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<material::Model, ServiceError> {
        let db = &*self.db_pool;

        Material::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Material {} not found", id)))
    }

    /// Filtered, paginated catalog listing.
    #[instrument(skip(self))]
    pub async fn get_all(
        &self,
        filter: MaterialFilter,
        page: u64,
        limit: u64,
    ) -> Result<MaterialListResponse, ServiceError> {
        let db = &*self.db_pool;
        let page = page.max(1);
        let limit = limit.clamp(1, 100);

        let mut query = Material::find().order_by_asc(material::Column::Name);
        if let Some(category) = &filter.category {
            query = query.filter(material::Column::Category.eq(category));
        }
        if let Some(company) = &filter.company {
            query = query.filter(material::Column::Company.eq(company));
        }
        if let Some(name) = &filter.material_name {
            query = query.filter(material::Column::Name.eq(name));
        }
        if let Some(code) = &filter.material_code {
            query = query.filter(material::Column::MaterialCode.eq(code));
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let materials = paginator.fetch_page(page - 1).await?;

        Ok(MaterialListResponse {
            materials,
            total,
            page,
            limit,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let result = Material::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Material {} not found", id)));
        }

        if let Err(e) = self.event_sender.send(Event::MaterialDeleted(id)).await {
            warn!(error = %e, "Failed to send material deleted event");
        }

        Ok(())
    }

    /// Picker projection over the whole catalog.
    #[instrument(skip(self))]
    pub async fn materials_list(&self) -> Result<Vec<MaterialOption>, ServiceError> {
        let db = &*self.db_pool;

        let materials = Material::find()
            .order_by_asc(material::Column::Name)
            .all(db)
            .await?;

        Ok(materials
            .into_iter()
            .map(|m| MaterialOption {
                label: m.name,
                value: m.id,
            })
            .collect())
    }
}
