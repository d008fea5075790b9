use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde_json::Value;

use crate::{
    db::{DbPool, OrmConn},
    entity::{
        cart_items::{Column as CartItemCol, Entity as CartItems, Model as CartItemModel},
        carts::{Column as CartCol, Entity as Carts},
        products::{
            ActiveModel as ProductActive, Column as ProductCol, Entity as Products,
            Model as ProductModel,
        },
        rental_transactions::{
            ActiveModel as TransactionActive, Entity as RentalTransactions,
            Model as TransactionModel,
        },
    },
    error::{AppError, AppResult},
    models::{
        Cart, CartItem, CartMerge, PaymentStatus, Product, QUANTITY_TOO_LARGE, RefId, RentType,
        RentalPrice, RentalTransaction, TransactionStatus,
    },
    store::{CartStore, ProductStore, TransactionStore},
};

/// PostgreSQL-backed store. Entities go through SeaORM; the cart merge uses
/// raw sqlx upserts on the same pool.
#[derive(Clone)]
pub struct PgStore {
    orm: OrmConn,
}

impl PgStore {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }

    fn pool(&self) -> &DbPool {
        self.orm.get_postgres_connection_pool()
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn insert_product(&self, product: &Product) -> AppResult<()> {
        let (per_hour, per_day, per_month) = product.price.columns();
        let active = ProductActive {
            id: Set(product.id.to_hex()),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            location: Set(product.location.clone()),
            category: Set(product.category.clone()),
            price_per_hour: Set(per_hour),
            price_per_day: Set(per_day),
            price_per_month: Set(per_month),
            images: Set(Value::from(product.images.clone())),
            owner_id: Set(product.owner_id.to_hex()),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
        };
        active.insert(&self.orm).await?;
        Ok(())
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Products::find()
            .order_by_asc(ProductCol::CreatedAt)
            .order_by_asc(ProductCol::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect()
    }

    async fn find_product(&self, id: RefId) -> AppResult<Option<Product>> {
        Products::find_by_id(id.to_hex())
            .one(&self.orm)
            .await?
            .map(product_from_entity)
            .transpose()
    }
}

#[async_trait]
impl CartStore for PgStore {
    async fn merge_cart_item(&self, user_id: RefId, item: CartItem) -> AppResult<CartMerge> {
        let mut tx = self.pool().begin().await?;

        // xmax is zero only for a freshly inserted row.
        let (cart_id, created): (String, bool) = sqlx::query_as(
            r#"
            INSERT INTO carts (id, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = EXCLUDED.updated_at
            RETURNING id, (xmax = 0) AS created
            "#,
        )
        .bind(RefId::new().to_hex())
        .bind(user_id.to_hex())
        .bind(item.added_at)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO cart_items (cart_id, product_id, quantity, name, price, category, images, added_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (cart_id, product_id) DO UPDATE
            SET quantity = cart_items.quantity + EXCLUDED.quantity,
                added_at = EXCLUDED.added_at
            "#,
        )
        .bind(&cart_id)
        .bind(item.product_id.to_hex())
        .bind(item.quantity)
        .bind(item.name)
        .bind(item.price)
        .bind(item.category)
        .bind(item.images.map(Value::from))
        .bind(item.added_at)
        .execute(&mut *tx)
        .await
        .map_err(quantity_overflow)?;

        tx.commit().await?;

        let cart_id = stored_id(&cart_id)?;
        Ok(if created {
            CartMerge::Created(cart_id)
        } else {
            CartMerge::Updated(cart_id)
        })
    }

    async fn find_cart(&self, user_id: RefId) -> AppResult<Option<Cart>> {
        let cart = Carts::find()
            .filter(CartCol::UserId.eq(user_id.to_hex()))
            .one(&self.orm)
            .await?;
        let Some(cart) = cart else {
            return Ok(None);
        };

        let items = CartItems::find()
            .filter(CartItemCol::CartId.eq(cart.id.clone()))
            .order_by_asc(CartItemCol::Position)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(cart_item_from_entity)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Some(Cart {
            id: stored_id(&cart.id)?,
            user_id: stored_id(&cart.user_id)?,
            items,
            created_at: cart.created_at.with_timezone(&Utc),
            updated_at: cart.updated_at.with_timezone(&Utc),
        }))
    }
}

#[async_trait]
impl TransactionStore for PgStore {
    async fn insert_transaction(&self, transaction: &RentalTransaction) -> AppResult<()> {
        let active = TransactionActive {
            id: Set(transaction.id.to_hex()),
            product_id: Set(transaction.product_id.to_hex()),
            owner_id: Set(transaction.owner_id.to_hex()),
            renter_id: Set(transaction.renter_id.to_hex()),
            renttype: Set(transaction.renttype.as_str().to_string()),
            duration: Set(transaction.duration),
            total_amount: Set(transaction.total_amount),
            transaction_date: Set(transaction.transaction_date.into()),
            start_date: Set(transaction.start_date.into()),
            end_date: Set(transaction.end_date.map(Into::into)),
            security_deposit: Set(transaction.security_deposit),
            payment_status: Set(transaction.payment_status.as_str().to_string()),
            status: Set(transaction.status.as_str().to_string()),
            notes: Set(transaction.notes.clone()),
            created_at: Set(transaction.created_at.into()),
        };
        active.insert(&self.orm).await?;
        Ok(())
    }

    async fn find_transaction(&self, id: RefId) -> AppResult<Option<RentalTransaction>> {
        RentalTransactions::find_by_id(id.to_hex())
            .one(&self.orm)
            .await?
            .map(transaction_from_entity)
            .transpose()
    }
}

// SQLSTATE 22003: the summed BIGINT quantity left the column's range.
fn quantity_overflow(err: sqlx::Error) -> AppError {
    let out_of_range = err
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == "22003");
    if out_of_range {
        AppError::bad_request(QUANTITY_TOO_LARGE)
    } else {
        AppError::DbError(err)
    }
}

fn stored_id(raw: &str) -> AppResult<RefId> {
    RefId::parse(raw.trim())
        .ok_or_else(|| AppError::Internal(anyhow!("malformed id {raw:?} in storage")))
}

fn product_from_entity(model: ProductModel) -> AppResult<Product> {
    let id = stored_id(&model.id)?;
    let price = RentalPrice::from_columns(
        model.price_per_hour,
        model.price_per_day,
        model.price_per_month,
    )
    .ok_or_else(|| AppError::Internal(anyhow!("product {id} does not have exactly one price")))?;
    let images: Vec<String> = serde_json::from_value(model.images)
        .map_err(|err| AppError::Internal(anyhow!("product {id} images: {err}")))?;

    Ok(Product {
        id,
        name: model.name,
        description: model.description,
        location: model.location,
        category: model.category,
        price,
        images,
        owner_id: stored_id(&model.owner_id)?,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn cart_item_from_entity(model: CartItemModel) -> AppResult<CartItem> {
    let images = model
        .images
        .map(serde_json::from_value::<Vec<String>>)
        .transpose()
        .map_err(|err| AppError::Internal(anyhow!("cart item images: {err}")))?;

    Ok(CartItem {
        product_id: stored_id(&model.product_id)?,
        quantity: model.quantity,
        name: model.name,
        price: model.price,
        category: model.category,
        images,
        added_at: model.added_at.with_timezone(&Utc),
    })
}

fn transaction_from_entity(model: TransactionModel) -> AppResult<RentalTransaction> {
    let id = stored_id(&model.id)?;
    let renttype = model.renttype.parse::<RentType>().map_err(|_| {
        AppError::Internal(anyhow!("transaction {id} has rent type {:?}", model.renttype))
    })?;
    let payment_status = PaymentStatus::parse(&model.payment_status).ok_or_else(|| {
        AppError::Internal(anyhow!(
            "transaction {id} has payment status {:?}",
            model.payment_status
        ))
    })?;
    let status = TransactionStatus::parse(&model.status).ok_or_else(|| {
        AppError::Internal(anyhow!("transaction {id} has status {:?}", model.status))
    })?;

    Ok(RentalTransaction {
        id,
        product_id: stored_id(&model.product_id)?,
        owner_id: stored_id(&model.owner_id)?,
        renter_id: stored_id(&model.renter_id)?,
        renttype,
        duration: model.duration,
        total_amount: model.total_amount,
        transaction_date: model.transaction_date.with_timezone(&Utc),
        start_date: model.start_date.with_timezone(&Utc),
        end_date: model.end_date.map(|date| date.with_timezone(&Utc)),
        security_deposit: model.security_deposit,
        payment_status,
        status,
        notes: model.notes,
        created_at: model.created_at.with_timezone(&Utc),
    })
}
