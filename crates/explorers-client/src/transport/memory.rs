//! In-Memory API
//!
//! A complete stand-in for the admin REST API, kept in process memory. The
//! front end uses it as the demo backend; tests use it to observe exactly what
//! the client sends.

use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::{json, Map, Value};

use super::{ApiRequest, ApiResponse, HttpTransport, Method, MultipartForm, RequestBody};
use crate::domain::total_pages_for;
use crate::error::{ApiError, ApiResult};
use crate::query::encode_query;

const QUEST_STATUSES: [&str; 4] = ["active", "inactive", "draft", "expired"];

/// A request as the in-memory API received it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    /// Encoded exactly as a real transport would put it on the URL
    pub query_string: String,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

#[derive(Debug, Clone, Copy)]
enum Injected {
    Status(u16),
    Network,
}

struct Table {
    path: &'static str,
    id_prefix: &'static str,
    /// Field compared against the `filter` parameter
    filter_field: &'static str,
    /// Fields a create must carry
    required: &'static [(&'static str, &'static str)],
    read_only: bool,
    next_id: u64,
    rows: Vec<Map<String, Value>>,
}

impl Table {
    fn new(
        path: &'static str,
        id_prefix: &'static str,
        filter_field: &'static str,
        required: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            path,
            id_prefix,
            filter_field,
            required,
            read_only: false,
            next_id: 1,
            rows: Vec::new(),
        }
    }

    fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.get("id").and_then(Value::as_str) == Some(id))
    }

    fn assign_id(&mut self) -> String {
        loop {
            let id = format!("{}{}", self.id_prefix, self.next_id);
            self.next_id += 1;
            if self.position(&id).is_none() {
                return id;
            }
        }
    }
}

struct MemoryState {
    accounts: Vec<(String, String)>,
    issued_tokens: Vec<String>,
    accept_any_token: bool,
    tables: Vec<Table>,
    token_counter: u64,
    injected: VecDeque<Injected>,
    log: Vec<RecordedRequest>,
    total_signups: u64,
    daily_active_users: u64,
}

pub struct InMemoryApi {
    state: Mutex<MemoryState>,
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryApi {
    /// Empty API with no accounts; only tokens it issued are accepted
    pub fn new() -> Self {
        let tables = vec![
            Table::new(
                "quests",
                "q",
                "status",
                &[
                    ("title", "Title is required"),
                    ("description", "Description is required"),
                ],
            ),
            Table::new("collectibles", "c", "name", &[("name", "Collectible name is required")]),
            Table::new(
                "collectibles/collections",
                "col",
                "collectionType",
                &[("name", "Collection name is required")],
            ),
            Table::new("mementos", "m", "type", &[]),
            Table::new(
                "passports",
                "p",
                "status",
                &[("name", "Name is required"), ("userId", "User ID is required")],
            ),
            Table::new("subscriptions", "s", "status", &[]).read_only(),
        ];
        Self {
            state: Mutex::new(MemoryState {
                accounts: Vec::new(),
                issued_tokens: Vec::new(),
                accept_any_token: false,
                tables,
                token_counter: 0,
                injected: VecDeque::new(),
                log: Vec::new(),
                total_signups: 0,
                daily_active_users: 0,
            }),
        }
    }

    /// API pre-filled with a small catalogue, accepting any bearer token
    pub fn with_demo_data() -> Self {
        let api = Self::new()
            .with_account("admin@explorers.live", "password")
            .accept_any_token();
        {
            let mut state = api.state.lock();
            state.total_signups = 12_345;
            state.daily_active_users = 850;
        }
        api.seed("collectibles", json!({"id": "c1", "name": "Kilometre Coin",
            "imageUrl": "https://via.placeholder.com/50/09f/fff.png?text=KM"}));
        api.seed("collectibles", json!({"id": "c2", "name": "Country Discoverer Badge",
            "imageUrl": "https://via.placeholder.com/50/f90/fff.png?text=CTY"}));
        api.seed("collectibles", json!({"id": "c3", "name": "Daily Login Streak Star",
            "imageUrl": "https://via.placeholder.com/50/90f/fff.png?text=STR"}));
        api.seed("quests", json!({"id": "q1", "title": "Daily Kilometre Challenge",
            "description": "Walk one kilometre today.", "status": "active", "difficulty": "Easy",
            "startDate": "2023-11-01T00:00:00Z", "endDate": "2023-11-01T23:59:59Z",
            "rewardCollectibleId": "c1"}));
        api.seed("quests", json!({"id": "q2", "title": "Discover a New Country",
            "description": "Check in from a country you have never visited.", "status": "inactive",
            "difficulty": "Hard", "startDate": "2023-11-01T00:00:00Z",
            "endDate": "2023-11-30T23:59:59Z", "rewardCollectibleId": "c2"}));
        api.seed("collectibles/collections", json!({"id": "col1", "name": "Nordic Stamps",
            "description": "Stamps from every Nordic capital.", "collectionType": "Stamps",
            "collectedCount": 3, "totalInCollectionCount": 5, "totalCollectionCollectorPoints": 150}));
        api.seed("mementos", json!({"id": "m1", "type": "Image", "location": {"x": 59.33, "y": 18.06},
            "url": "https://example.com/m1.jpg", "thumbnailUrl": "https://example.com/m1_thumb.jpg",
            "isRoyalExplorerOnTimeOfDiscovery": true, "captureDate": "2024-06-01T12:00:00Z",
            "isMementoLocked": false}));
        api.seed("passports", json!({"id": "p1", "name": "Astrid Explorer", "status": "active",
            "userId": "u1", "passportNumber": "EX-0001", "countryOfOrigin": "Sweden",
            "coins": 420, "countriesCount": 12, "municipalitiesCount": 48,
            "kilometersTravelled": 1520.5, "lastVisitedCountry": "Norway"}));
        api.seed("subscriptions", json!({"id": "s1", "name": "Royal Explorer", "price": 4.99,
            "status": "active", "startDate": "2024-01-01T00:00:00Z"}));
        api
    }

    pub fn with_account(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.state.lock().accounts.push((email.into(), password.into()));
        self
    }

    /// Accept any non-blank bearer token (Google and debug sessions)
    pub fn accept_any_token(self) -> Self {
        self.state.lock().accept_any_token = true;
        self
    }

    /// Insert a raw record; assigns an id when the record has none
    pub fn seed(&self, path: &str, record: Value) -> String {
        let mut state = self.state.lock();
        let Some(table) = state.tables.iter_mut().find(|t| t.path == path) else {
            return String::new();
        };
        let mut row = match record {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let id = match row.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => table.assign_id(),
        };
        row.insert("id".into(), Value::String(id.clone()));
        table.rows.push(row);
        id
    }

    /// Current stored copy of a record
    pub fn record(&self, path: &str, id: &str) -> Option<Value> {
        let state = self.state.lock();
        let table = state.tables.iter().find(|t| t.path == path)?;
        let pos = table.position(id)?;
        Some(Value::Object(table.rows[pos].clone()))
    }

    pub fn count(&self, path: &str) -> usize {
        let state = self.state.lock();
        state
            .tables
            .iter()
            .find(|t| t.path == path)
            .map(|t| t.rows.len())
            .unwrap_or(0)
    }

    /// Answer the next request with this status instead of handling it
    pub fn fail_next(&self, status: u16) {
        self.state.lock().injected.push_back(Injected::Status(status));
    }

    /// Drop the next request as if the network failed
    pub fn fail_next_with_network_error(&self) {
        self.state.lock().injected.push_back(Injected::Network);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().log.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().log.last().cloned()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HttpTransport for InMemoryApi {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let mut state = self.state.lock();
        state.log.push(RecordedRequest {
            method: request.method,
            path: request.path.clone(),
            query_string: encode_query(&request.query),
            bearer: request.bearer.clone(),
            body: request.body.clone(),
        });

        match state.injected.pop_front() {
            Some(Injected::Network) => {
                return Err(ApiError::Network("connection reset (injected)".into()))
            }
            Some(Injected::Status(status)) => {
                return Ok(ApiResponse::json(status, &json!({"message": "Injected failure"})))
            }
            None => {}
        }

        Ok(state.handle(request))
    }
}

fn error(status: u16, message: impl Into<String>) -> ApiResponse {
    ApiResponse::json(status, &json!({ "message": message.into() }))
}

fn now() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Body as a flat field map plus any uploaded files
fn body_fields(body: RequestBody) -> Result<(Map<String, Value>, MultipartForm), ApiResponse> {
    match body {
        RequestBody::Json(Value::Object(map)) => Ok((map, MultipartForm::default())),
        RequestBody::Json(_) => Err(error(400, "Expected a JSON object")),
        RequestBody::Multipart(form) => {
            let map = form
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            Ok((map, form))
        }
        RequestBody::Empty => Ok((Map::new(), MultipartForm::default())),
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        _ => {
            let x = a.map(text_of).unwrap_or_default().to_lowercase();
            let y = b.map(text_of).unwrap_or_default().to_lowercase();
            x.cmp(&y)
        }
    }
}

impl MemoryState {
    fn handle(&mut self, request: ApiRequest) -> ApiResponse {
        let path = request.path.trim_matches('/').to_string();

        if path == "auth/login" && request.method == Method::Post {
            return self.login(request.body);
        }

        if !self.authorized(request.bearer.as_deref()) {
            return error(401, "Unauthorized");
        }

        if path == "dashboard/stats" && request.method == Method::Get {
            return self.dashboard();
        }

        // Longest table path first so `collectibles/collections` beats `collectibles`
        let mut candidates: Vec<usize> = (0..self.tables.len()).collect();
        candidates.sort_by_key(|i| std::cmp::Reverse(self.tables[*i].path.len()));
        let Some((index, rest)) = candidates.into_iter().find_map(|i| {
            let table_path = self.tables[i].path;
            if path == table_path {
                Some((i, String::new()))
            } else {
                path.strip_prefix(&format!("{}/", table_path))
                    .map(|rest| (i, rest.to_string()))
            }
        }) else {
            return error(404, format!("No route for /{}", path));
        };

        let segments: Vec<String> = rest
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_encoding::percent_decode_str(s).decode_utf8_lossy().to_string())
            .collect();

        let read_only = self.tables[index].read_only;
        match (request.method, segments.as_slice()) {
            (Method::Get, []) => self.list(index, &request.query),
            (Method::Get, [id]) => self.get(index, id),
            (_, _) if read_only => error(405, "This resource is read-only"),
            (Method::Post, []) => self.create(index, request.body),
            (Method::Put, [id]) => self.update(index, id, request.body),
            (Method::Delete, [id]) => self.delete(index, id),
            (Method::Patch, [id, sub]) if sub == "status" && self.tables[index].path == "quests" => {
                self.set_status(index, id, request.body)
            }
            _ => error(405, "Method not allowed"),
        }
    }

    fn authorized(&self, bearer: Option<&str>) -> bool {
        match bearer.map(str::trim) {
            Some(token) if !token.is_empty() => {
                self.accept_any_token || self.issued_tokens.iter().any(|t| t == token)
            }
            _ => false,
        }
    }

    fn login(&mut self, body: RequestBody) -> ApiResponse {
        let Ok((fields, _)) = body_fields(body) else {
            return error(400, "Expected email and password");
        };
        let email = fields.get("email").map(text_of).unwrap_or_default();
        let password = fields.get("password").map(text_of).unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return error(400, "Email and password are required");
        }
        if !self
            .accounts
            .iter()
            .any(|(e, p)| e.eq_ignore_ascii_case(&email) && *p == password)
        {
            return error(401, "Invalid email or password");
        }
        self.token_counter += 1;
        let access = format!("memory-access-{}", self.token_counter);
        let refresh = format!("memory-refresh-{}", self.token_counter);
        self.issued_tokens.push(access.clone());
        ApiResponse::json(200, &json!({"accessToken": access, "refreshToken": refresh}))
    }

    fn dashboard(&self) -> ApiResponse {
        let table = |path: &str| self.tables.iter().find(|t| t.path == path);
        let active_quests = table("quests")
            .map(|t| {
                t.rows
                    .iter()
                    .filter(|r| r.get("status").and_then(Value::as_str) == Some("active"))
                    .count()
            })
            .unwrap_or(0);
        let collectibles = table("collectibles").map(|t| t.rows.len()).unwrap_or(0);
        ApiResponse::json(
            200,
            &json!({
                "totalSignups": self.total_signups,
                "dailyActiveUsers": self.daily_active_users,
                "activeQuests": active_quests,
                "totalCollectibles": collectibles,
            }),
        )
    }

    fn list(&self, index: usize, query: &[(String, String)]) -> ApiResponse {
        let table = &self.tables[index];
        let param = |name: &str| {
            query
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        let page_size = param("pageSize")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(10);
        let page_number = param("pageNumber")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0);

        let mut rows: Vec<&Map<String, Value>> = table.rows.iter().collect();

        if let Some(key) = param("key").map(str::to_lowercase) {
            rows.retain(|row| {
                row.values()
                    .any(|v| v.is_string() && text_of(v).to_lowercase().contains(&key))
            });
        }
        if let Some(filter) = param("filter") {
            let operator = param("operator").unwrap_or("eq");
            let wanted = filter.to_lowercase();
            rows.retain(|row| {
                let actual = row
                    .get(table.filter_field)
                    .map(text_of)
                    .unwrap_or_default()
                    .to_lowercase();
                match operator {
                    "contains" => actual.contains(&wanted),
                    "startsWith" => actual.starts_with(&wanted),
                    _ => actual == wanted,
                }
            });
        }
        if let Some(order) = param("order") {
            rows.sort_by(|a, b| compare_values(a.get(order), b.get(order)));
            if param("direction") == Some("desc") {
                rows.reverse();
            }
        }

        let total_count = rows.len() as u64;
        let start = (page_number as usize).saturating_mul(page_size as usize);
        let items: Vec<Value> = rows
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .map(|row| Value::Object(row.clone()))
            .collect();

        ApiResponse::json(
            200,
            &json!({
                "items": items,
                "totalCount": total_count,
                "totalPages": total_pages_for(total_count, page_size),
                "pageNumber": page_number,
            }),
        )
    }

    fn get(&self, index: usize, id: &str) -> ApiResponse {
        let table = &self.tables[index];
        match table.position(id) {
            Some(pos) => ApiResponse::json(200, &Value::Object(table.rows[pos].clone())),
            None => error(404, format!("No record with id {}", id)),
        }
    }

    fn create(&mut self, index: usize, body: RequestBody) -> ApiResponse {
        let (mut fields, form) = match body_fields(body) {
            Ok(parts) => parts,
            Err(response) => return response,
        };
        fields.remove("id");

        let table = &mut self.tables[index];
        let mut missing = Map::new();
        for (field, message) in table.required {
            if fields.get(*field).map(text_of).unwrap_or_default().trim().is_empty() {
                missing.insert(field.to_string(), Value::String(message.to_string()));
            }
        }
        if !missing.is_empty() {
            return ApiResponse::json(
                400,
                &json!({"message": "One or more fields are invalid", "errors": missing}),
            );
        }

        let id = table.assign_id();
        fields.insert("id".into(), Value::String(id.clone()));
        if table.path == "quests" && !fields.contains_key("status") {
            fields.insert("status".into(), Value::String("inactive".into()));
        }
        for file in &form.files {
            fields.insert(
                format!("{}Url", file.field),
                Value::String(format!("memory://{}/{}/{}", table.path, id, file.file_name)),
            );
        }
        fields.insert("createdDate".into(), now());
        fields.insert("lastModifiedDate".into(), now());
        table.rows.push(fields.clone());
        log::debug!("memory api: created {}/{}", table.path, id);
        ApiResponse::json(201, &Value::Object(fields))
    }

    fn update(&mut self, index: usize, id: &str, body: RequestBody) -> ApiResponse {
        let (fields, form) = match body_fields(body) {
            Ok(parts) => parts,
            Err(response) => return response,
        };
        if let Some(body_id) = fields.get("id").map(text_of) {
            if body_id != id {
                return error(400, format!("Body id {} does not match {}", body_id, id));
            }
        }

        let table = &mut self.tables[index];
        let Some(pos) = table.position(id) else {
            return error(404, format!("No record with id {}", id));
        };
        let path = table.path;
        let row = &mut table.rows[pos];
        for (key, value) in fields {
            if key != "id" {
                row.insert(key, value);
            }
        }
        // Absent file parts keep the stored attachment
        for file in &form.files {
            row.insert(
                format!("{}Url", file.field),
                Value::String(format!("memory://{}/{}/{}", path, id, file.file_name)),
            );
        }
        row.insert("lastModifiedDate".into(), now());
        ApiResponse::json(200, &Value::Object(row.clone()))
    }

    fn delete(&mut self, index: usize, id: &str) -> ApiResponse {
        let path = self.tables[index].path;
        let Some(pos) = self.tables[index].position(id) else {
            return error(404, format!("No record with id {}", id));
        };

        if path == "collectibles" {
            let referencing = self
                .tables
                .iter()
                .find(|t| t.path == "quests")
                .and_then(|quests| {
                    quests.rows.iter().find(|q| {
                        q.get("rewardCollectibleId").and_then(Value::as_str) == Some(id)
                    })
                })
                .and_then(|q| q.get("id").and_then(Value::as_str).map(str::to_string));
            if let Some(quest_id) = referencing {
                return error(
                    409,
                    format!("Collectible {} is the reward of quest {}", id, quest_id),
                );
            }
        }

        self.tables[index].rows.remove(pos);
        ApiResponse::empty(204)
    }

    fn set_status(&mut self, index: usize, id: &str, body: RequestBody) -> ApiResponse {
        let (fields, _) = match body_fields(body) {
            Ok(parts) => parts,
            Err(response) => return response,
        };
        let status = fields.get("status").map(text_of).unwrap_or_default();
        if !QUEST_STATUSES.contains(&status.as_str()) {
            return error(400, format!("Unknown status '{}'", status));
        }
        let table = &mut self.tables[index];
        let Some(pos) = table.position(id) else {
            return error(404, format!("No record with id {}", id));
        };
        let row = &mut table.rows[pos];
        row.insert("status".into(), Value::String(status));
        row.insert("lastModifiedDate".into(), now());
        ApiResponse::json(200, &Value::Object(row.clone()))
    }
}
