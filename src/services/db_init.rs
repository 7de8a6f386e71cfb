use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    IndexModel,
};

use super::store::{Db, StoreError, HOLDINGS, JOURNALS, OWNER_FIELD, TRADES, USERS};

pub async fn ensure_indexes(db: &Db) -> Result<(), StoreError> {
    let Some(db) = db.database() else {
        return Ok(());
    };

    // users: unique email
    {
        let col = db.collection::<Document>(USERS);
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None).await?;
    }

    // child records: listed by owner
    for name in [HOLDINGS, TRADES, JOURNALS] {
        let col = db.collection::<Document>(name);
        let model = IndexModel::builder().keys(doc! { OWNER_FIELD: 1 }).build();

        col.create_index(model, None).await?;
    }

    Ok(())
}
