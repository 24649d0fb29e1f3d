//! In-memory stand-ins for the host services.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use plugin_license_alert::plugin::PLUGIN_ID;
use plugin_license_alert::settings::{self, CATALOG};
use seatwatch_core::types::{MessageId, RoomId, UserId};
use seatwatch_plugin::api::context::{
    PluginContext, PluginHttpService, PluginMessagingService,
};
use seatwatch_plugin::api::http::{HttpRequest, HttpResponse};
use seatwatch_plugin::api::messaging::{ChatMessage, ChatRoom, ChatUser, RoomType};
use seatwatch_plugin::api::settings::SettingsStore;

pub const WORKSPACE_URL: &str = "https://chat.example.com";
pub const ENDPOINT_URL: &str = "https://hooks.example.com/license";

pub fn user(id: &str, username: &str) -> ChatUser {
    ChatUser {
        id: UserId::new(id),
        username: username.to_string(),
        name: None,
    }
}

pub fn room(id: &str, display_name: &str) -> ChatRoom {
    ChatRoom {
        id: RoomId::new(id),
        room_type: RoomType::Channel,
        display_name: Some(display_name.to_string()),
        slugified_name: None,
    }
}

/// Settings store loaded with the catalog plus the given values.
pub async fn settings_with(values: &[(&str, Value)]) -> Arc<SettingsStore> {
    let store = Arc::new(SettingsStore::new());
    store
        .provide(PLUGIN_ID, CATALOG.clone())
        .await
        .expect("provide catalog");

    store
        .set_value(PLUGIN_ID, settings::WORKSPACE_URL, json!(WORKSPACE_URL))
        .await
        .expect("set url");
    store
        .set_value(PLUGIN_ID, settings::WORKSPACE_USER_ID, json!("admin-id"))
        .await
        .expect("set user id");
    store
        .set_value(PLUGIN_ID, settings::WORKSPACE_AUTH_TOKEN, json!("admin-token"))
        .await
        .expect("set token");

    for (id, value) in values {
        store
            .set_value(PLUGIN_ID, id, value.clone())
            .await
            .expect("set value");
    }
    store
}

/// Messaging service that records everything it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingMessaging {
    pub app_user: Option<ChatUser>,
    pub users: HashMap<UserId, ChatUser>,
    pub rooms: Mutex<HashMap<RoomId, ChatRoom>>,
    pub direct_rooms: Mutex<HashMap<Vec<String>, ChatRoom>>,
    pub created_direct_rooms: Mutex<Vec<String>>,
    pub member_additions: Mutex<Vec<RoomId>>,
    pub reject_member_additions: bool,
    /// `create_direct_room` fails outright.
    pub fail_direct_room_creation: bool,
    /// `create_direct_room` reports success but the room never shows up.
    pub drop_created_direct_rooms: bool,
    /// Rooms where `send_message` fails.
    pub failing_sends: Vec<RoomId>,
    pub sent: Mutex<Vec<ChatMessage>>,
}

impl RecordingMessaging {
    /// Service account `alert.bot` and one user `u-alice` / `alice`.
    pub fn new() -> Self {
        let mut users = HashMap::new();
        let alice = user("u-alice", "alice");
        users.insert(alice.id.clone(), alice);

        Self {
            app_user: Some(user("u-bot", "alert.bot")),
            users,
            ..Self::default()
        }
    }

    pub fn with_room(self, room: ChatRoom) -> Self {
        self.rooms
            .lock()
            .expect("lock")
            .insert(room.id.clone(), room);
        self
    }

    pub fn sent(&self) -> Vec<ChatMessage> {
        self.sent.lock().expect("lock").clone()
    }

    fn direct_key(usernames: &[String]) -> Vec<String> {
        let mut key = usernames.to_vec();
        key.sort();
        key
    }
}

#[async_trait]
impl PluginMessagingService for RecordingMessaging {
    async fn app_user(&self) -> Result<Option<ChatUser>, String> {
        Ok(self.app_user.clone())
    }

    async fn user_by_id(&self, user_id: &UserId) -> Result<Option<ChatUser>, String> {
        Ok(self.users.get(user_id).cloned())
    }

    async fn direct_room_by_usernames(
        &self,
        usernames: &[String],
    ) -> Result<Option<ChatRoom>, String> {
        let direct_rooms = self.direct_rooms.lock().expect("lock");
        Ok(direct_rooms.get(&Self::direct_key(usernames)).cloned())
    }

    async fn create_direct_room(
        &self,
        creator: &ChatUser,
        member_username: &str,
    ) -> Result<RoomId, String> {
        if self.fail_direct_room_creation {
            return Err("error-invalid-user".to_string());
        }

        let room_id = RoomId::new(format!("dm-{}", member_username));
        let room = ChatRoom {
            id: room_id.clone(),
            room_type: RoomType::DirectMessage,
            display_name: None,
            slugified_name: None,
        };
        let key = Self::direct_key(&[creator.username.clone(), member_username.to_string()]);
        if !self.drop_created_direct_rooms {
            self.direct_rooms.lock().expect("lock").insert(key, room);
        }
        self.created_direct_rooms
            .lock()
            .expect("lock")
            .push(member_username.to_string());
        Ok(room_id)
    }

    async fn room_by_id(&self, room_id: &RoomId) -> Result<Option<ChatRoom>, String> {
        Ok(self.rooms.lock().expect("lock").get(room_id).cloned())
    }

    async fn add_room_member(&self, room_id: &RoomId, _user: &ChatUser) -> Result<(), String> {
        if self.reject_member_additions {
            return Err("user is already a member".to_string());
        }
        self.member_additions
            .lock()
            .expect("lock")
            .push(room_id.clone());
        Ok(())
    }

    async fn send_message(&self, message: ChatMessage) -> Result<MessageId, String> {
        if self.failing_sends.contains(&message.room_id) {
            return Err(format!("room {} is read-only", message.room_id));
        }

        let mut sent = self.sent.lock().expect("lock");
        sent.push(message);
        Ok(MessageId::new(format!("m-{}", sent.len())))
    }
}

/// A request seen by [`ScriptedHttp`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub request: HttpRequest,
}

/// HTTP service answering GET and POST with fixed responses.
#[derive(Debug)]
pub struct ScriptedHttp {
    pub get_response: Result<HttpResponse, String>,
    pub post_response: Result<HttpResponse, String>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedHttp {
    /// Usage endpoint reports `active` of `max` seats; webhooks get 200.
    pub fn usage(max: u64, active: u64) -> Self {
        Self::get(HttpResponse::from_content(
            200,
            json!({"maxActiveUsers": max, "activeUsers": active, "success": true}).to_string(),
        ))
    }

    pub fn get(response: HttpResponse) -> Self {
        Self {
            get_response: Ok(response),
            post_response: Ok(HttpResponse::from_content(200, "ok".to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_get(error: &str) -> Self {
        Self {
            get_response: Err(error.to_string()),
            post_response: Ok(HttpResponse::from_content(200, "ok".to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_post(mut self, response: Result<HttpResponse, String>) -> Self {
        self.post_response = response;
        self
    }

    pub fn posts(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("lock")
            .iter()
            .filter(|r| r.method == "POST")
            .cloned()
            .collect()
    }

    pub fn gets(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("lock")
            .iter()
            .filter(|r| r.method == "GET")
            .cloned()
            .collect()
    }

    fn record(&self, method: &'static str, url: &str, request: HttpRequest) {
        self.requests.lock().expect("lock").push(RecordedRequest {
            method,
            url: url.to_string(),
            request,
        });
    }
}

#[async_trait]
impl PluginHttpService for ScriptedHttp {
    async fn get(&self, url: &str, request: HttpRequest) -> Result<HttpResponse, String> {
        self.record("GET", url, request);
        self.get_response.clone()
    }

    async fn post(&self, url: &str, request: HttpRequest) -> Result<HttpResponse, String> {
        self.record("POST", url, request);
        self.post_response.clone()
    }
}

/// Bundles a context with handles on the fakes behind it.
pub struct Harness {
    pub ctx: PluginContext,
    pub messaging: Arc<RecordingMessaging>,
    pub http: Arc<ScriptedHttp>,
}

pub async fn harness(
    values: &[(&str, Value)],
    messaging: RecordingMessaging,
    http: ScriptedHttp,
) -> Harness {
    let store = settings_with(values).await;
    let messaging = Arc::new(messaging);
    let http = Arc::new(http);

    let ctx = PluginContext {
        settings: Arc::new(store.scoped(PLUGIN_ID)),
        messaging: messaging.clone(),
        http: http.clone(),
    };

    Harness {
        ctx,
        messaging,
        http,
    }
}
