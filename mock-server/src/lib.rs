use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Collection path of the blog entry resource.
pub const BASE_PATH: &str = "/blog/api/blog_entry";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
}

/// What the collection endpoint returns per entry: no content column.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct PostInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Body returned by create and update.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Receipt {
    pub id: u64,
    pub read: String,
}

impl Receipt {
    fn for_id(id: u64) -> Self {
        Self {
            id,
            read: format!("{BASE_PATH}/{id}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    last_id: u64,
    posts: BTreeMap<u64, Post>,
}

impl Store {
    /// Titles are unique across posts, except for the post being updated.
    fn title_taken(&self, title: &str, except: Option<u64>) -> bool {
        self.posts
            .values()
            .any(|p| p.title == title && Some(p.id) != except)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let item_path = format!("{BASE_PATH}/{{id}}");
    Router::new()
        .route(BASE_PATH, get(list_posts).post(create_post))
        .route(&item_path, get(read_post).post(update_post).delete(delete_post))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<PostSummary>> {
    let store = db.read().await;
    Json(
        store
            .posts
            .values()
            .map(|p| PostSummary {
                id: p.id,
                title: p.title.clone(),
                description: p.description.clone(),
            })
            .collect(),
    )
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<PostInput>,
) -> Result<Json<Receipt>, StatusCode> {
    let mut store = db.write().await;
    if store.title_taken(&input.title, None) {
        tracing::warn!(title = %input.title, "duplicate title rejected");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    store.last_id += 1;
    let id = store.last_id;
    store.posts.insert(
        id,
        Post {
            id,
            title: input.title,
            description: input.description,
            content: input.content,
        },
    );
    tracing::info!(id, "post created");
    Ok(Json(Receipt::for_id(id)))
}

async fn read_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, StatusCode> {
    let store = db.read().await;
    store.posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<PostInput>,
) -> Result<Json<Receipt>, StatusCode> {
    let mut store = db.write().await;
    if store.title_taken(&input.title, Some(id)) {
        tracing::warn!(id, title = %input.title, "duplicate title rejected");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let post = store
        .posts
        .get_mut(&id)
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    post.title = input.title;
    post.description = input.description;
    post.content = input.content;
    Ok(Json(Receipt::for_id(id)))
}

async fn delete_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .posts
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
}
