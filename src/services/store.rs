//! Document store seam.
//!
//! Routes talk to four collections through [`Collection`]. The Mongo backend
//! forwards filters and updates to the driver; the memory backend keeps the
//! same BSON documents in a vector and evaluates the same operators, so the
//! service logic cannot tell them apart.

use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use futures_util::StreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Bson, Document},
    Client, Database,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::models::{Holding, Journal, Trade, User};

pub const USERS: &str = "users";
pub const HOLDINGS: &str = "holdings";
pub const TRADES: &str = "trades";
pub const JOURNALS: &str = "journals";

/// Field holding the owner's hex id on every child record.
pub const OWNER_FIELD: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(e: bson::ser::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<bson::de::Error> for StoreError {
    fn from(e: bson::de::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait Record: Serialize + DeserializeOwned + Unpin + Send + Sync + 'static {}

impl<T> Record for T where T: Serialize + DeserializeOwned + Unpin + Send + Sync + 'static {}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Id(ObjectId),
    Email(String),
    Owner(String),
    IdAndOwner(ObjectId, String),
    IdIn(Vec<ObjectId>),
}

impl Filter {
    pub fn to_document(&self) -> Document {
        match self {
            Filter::Id(id) => doc! { "_id": *id },
            Filter::Email(email) => doc! { "email": email },
            Filter::Owner(owner) => doc! { OWNER_FIELD: owner },
            Filter::IdAndOwner(id, owner) => doc! { "_id": *id, OWNER_FIELD: owner },
            Filter::IdIn(ids) => doc! { "_id": { "$in": ids.clone() } },
        }
    }

    fn matches(&self, d: &Document) -> bool {
        let id = d.get_object_id("_id").ok();
        match self {
            Filter::Id(want) => id == Some(*want),
            Filter::Email(email) => d.get_str("email").ok() == Some(email.as_str()),
            Filter::Owner(owner) => d.get_str(OWNER_FIELD).ok() == Some(owner.as_str()),
            Filter::IdAndOwner(want, owner) => {
                id == Some(*want) && d.get_str(OWNER_FIELD).ok() == Some(owner.as_str())
            }
            Filter::IdIn(ids) => id.map(|i| ids.contains(&i)).unwrap_or(false),
        }
    }
}

/// `$set` plus `$push`/`$pull` of string values on array fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    set: Document,
    push: Vec<(&'static str, String)>,
    pull: Vec<(&'static str, String)>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(fields: Document) -> Self {
        Update {
            set: fields,
            ..Default::default()
        }
    }

    /// `$set` of every stored field except `_id`.
    pub fn set_record<T: Serialize>(record: &T) -> StoreResult<Self> {
        let mut fields = bson::to_document(record)?;
        fields.remove("_id");
        Ok(Self::set(fields))
    }

    pub fn push(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.push.push((field, value.into()));
        self
    }

    pub fn pull(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.pull.push((field, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.push.is_empty() && self.pull.is_empty()
    }

    pub fn to_document(&self) -> Document {
        let mut out = Document::new();
        if !self.set.is_empty() {
            out.insert("$set", self.set.clone());
        }
        if !self.push.is_empty() {
            let mut push = Document::new();
            for (field, values) in group(&self.push) {
                if values.len() == 1 {
                    push.insert(field, values[0].clone());
                } else {
                    push.insert(field, doc! { "$each": values });
                }
            }
            out.insert("$push", push);
        }
        if !self.pull.is_empty() {
            let mut pull = Document::new();
            for (field, values) in group(&self.pull) {
                if values.len() == 1 {
                    pull.insert(field, values[0].clone());
                } else {
                    pull.insert(field, doc! { "$in": values });
                }
            }
            out.insert("$pull", pull);
        }
        out
    }

    /// Applies in place; returns whether the document changed.
    fn apply(&self, d: &mut Document) -> bool {
        let before = d.clone();

        for (k, v) in &self.set {
            d.insert(k.clone(), v.clone());
        }

        for (field, value) in &self.pull {
            if let Ok(arr) = d.get_array_mut(*field) {
                arr.retain(|b| b.as_str() != Some(value.as_str()));
            }
        }

        for (field, value) in &self.push {
            match d.get_array_mut(*field) {
                Ok(arr) => arr.push(Bson::String(value.clone())),
                Err(_) => {
                    d.insert(*field, vec![Bson::String(value.clone())]);
                }
            }
        }

        *d != before
    }
}

fn group(ops: &[(&'static str, String)]) -> Vec<(&'static str, Vec<String>)> {
    let mut out: Vec<(&'static str, Vec<String>)> = vec![];
    for (field, value) in ops {
        match out.iter_mut().find(|(f, _)| f == field) {
            Some((_, values)) => values.push(value.clone()),
            None => out.push((field, vec![value.clone()])),
        }
    }
    out
}

#[async_trait]
pub trait Collection<T: Record>: Send + Sync {
    async fn insert_one(&self, record: &T) -> StoreResult<ObjectId>;
    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<T>>;
    async fn find(&self, filter: &Filter) -> StoreResult<Vec<T>>;
    /// Returns the modified count.
    async fn update_one(&self, filter: &Filter, update: &Update) -> StoreResult<u64>;
    /// Returns the deleted count.
    async fn delete_one(&self, filter: &Filter) -> StoreResult<u64>;
}

// ---------------- Mongo ----------------

pub struct MongoCollection<T: Record> {
    inner: mongodb::Collection<T>,
}

impl<T: Record> MongoCollection<T> {
    pub fn new(db: &Database, name: &str) -> Self {
        Self {
            inner: db.collection::<T>(name),
        }
    }
}

#[async_trait]
impl<T: Record> Collection<T> for MongoCollection<T> {
    async fn insert_one(&self, record: &T) -> StoreResult<ObjectId> {
        let res = self.inner.insert_one(record, None).await?;
        res.inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Backend("inserted id is not an ObjectId".into()))
    }

    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<T>> {
        Ok(self.inner.find_one(filter.to_document(), None).await?)
    }

    async fn find(&self, filter: &Filter) -> StoreResult<Vec<T>> {
        let mut cursor = self.inner.find(filter.to_document(), None).await?;

        let mut out: Vec<T> = vec![];
        while let Some(res) = cursor.next().await {
            out.push(res?);
        }
        Ok(out)
    }

    async fn update_one(&self, filter: &Filter, update: &Update) -> StoreResult<u64> {
        if update.is_empty() {
            return Ok(0);
        }
        let res = self
            .inner
            .update_one(filter.to_document(), update.to_document(), None)
            .await?;
        Ok(res.modified_count)
    }

    async fn delete_one(&self, filter: &Filter) -> StoreResult<u64> {
        let res = self.inner.delete_one(filter.to_document(), None).await?;
        Ok(res.deleted_count)
    }
}

// ---------------- Memory ----------------

pub struct MemoryCollection<T: Record> {
    docs: RwLock<Vec<Document>>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self {
            docs: RwLock::new(vec![]),
            _record: PhantomData,
        }
    }
}

impl<T: Record> MemoryCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl<T: Record> Collection<T> for MemoryCollection<T> {
    async fn insert_one(&self, record: &T) -> StoreResult<ObjectId> {
        let mut d = bson::to_document(record)?;
        let id = match d.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                d.insert("_id", id);
                id
            }
        };

        let mut docs = self.docs.write().await;
        if docs.iter().any(|x| x.get_object_id("_id").ok() == Some(id)) {
            return Err(StoreError::Backend(format!("duplicate key: {}", id.to_hex())));
        }
        docs.push(d);
        Ok(id)
    }

    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<T>> {
        let docs = self.docs.read().await;
        match docs.iter().find(|d| filter.matches(d)) {
            Some(d) => Ok(Some(bson::from_document(d.clone())?)),
            None => Ok(None),
        }
    }

    async fn find(&self, filter: &Filter) -> StoreResult<Vec<T>> {
        let docs = self.docs.read().await;
        docs.iter()
            .filter(|d| filter.matches(d))
            .map(|d| bson::from_document(d.clone()).map_err(StoreError::from))
            .collect()
    }

    async fn update_one(&self, filter: &Filter, update: &Update) -> StoreResult<u64> {
        let mut docs = self.docs.write().await;
        match docs.iter_mut().find(|d| filter.matches(d)) {
            Some(d) => Ok(u64::from(update.apply(d))),
            None => Ok(0),
        }
    }

    async fn delete_one(&self, filter: &Filter) -> StoreResult<u64> {
        let mut docs = self.docs.write().await;
        match docs.iter().position(|d| filter.matches(d)) {
            Some(i) => {
                docs.remove(i);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

// ---------------- Db ----------------

#[derive(Clone)]
enum Backend {
    Mongo(Database),
    Memory,
}

/// The four collections the service works with.
#[derive(Clone)]
pub struct Db {
    pub users: Arc<dyn Collection<User>>,
    pub holdings: Arc<dyn Collection<Holding>>,
    pub trades: Arc<dyn Collection<Trade>>,
    pub journals: Arc<dyn Collection<Journal>>,
    backend: Backend,
}

impl Db {
    pub fn mongo(db: Database) -> Self {
        Db {
            users: Arc::new(MongoCollection::<User>::new(&db, USERS)),
            holdings: Arc::new(MongoCollection::<Holding>::new(&db, HOLDINGS)),
            trades: Arc::new(MongoCollection::<Trade>::new(&db, TRADES)),
            journals: Arc::new(MongoCollection::<Journal>::new(&db, JOURNALS)),
            backend: Backend::Mongo(db),
        }
    }

    pub fn memory() -> Self {
        Db {
            users: Arc::new(MemoryCollection::<User>::new()),
            holdings: Arc::new(MemoryCollection::<Holding>::new()),
            trades: Arc::new(MemoryCollection::<Trade>::new()),
            journals: Arc::new(MemoryCollection::<Journal>::new()),
            backend: Backend::Memory,
        }
    }

    /// `memory://` selects the in-process backend; anything else goes to the driver.
    pub async fn connect(uri: &str, db_name: &str) -> StoreResult<Self> {
        if uri.starts_with("memory://") {
            return Ok(Db::memory());
        }
        let client = Client::with_uri_str(uri).await?;
        Ok(Db::mongo(client.database(db_name)))
    }

    pub fn database(&self) -> Option<&Database> {
        match &self.backend {
            Backend::Mongo(db) => Some(db),
            Backend::Memory => None,
        }
    }

    pub async fn ping(&self) -> StoreResult<()> {
        match &self.backend {
            Backend::Mongo(db) => {
                db.run_command(doc! { "ping": 1 }, None).await?;
                Ok(())
            }
            Backend::Memory => Ok(()),
        }
    }
}
