use crate::api::models::*;
use crate::config::AppState;
use crate::error::{extract_message, rejection_message, ApiError};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Why an OTP is being requested; the server checks registration status differently for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Login,
    Signup,
    ProfileUpdate,
}

impl OtpPurpose {
    fn as_str(self) -> &'static str {
        match self {
            OtpPurpose::Login => "login",
            OtpPurpose::Signup => "signup",
            OtpPurpose::ProfileUpdate => "profile_update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub sakh: String,
    pub email: String,
    pub mobile: String,
    pub username: String,
    pub password: String,
}

/// A spreadsheet picked for the admin bulk upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)?;
        let http = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base, token: None })
    }

    /// Client pointed at the configured server, carrying the stored session token.
    pub fn from_state(state: &AppState) -> Result<Self, ApiError> {
        Ok(Self::new(&state.api_url())?.with_token(state.token.clone()))
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => req.header("Authorization", format!("Token {}", t)),
            None => req,
        }
    }

    fn authed(&self, req: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        if self.token.is_none() {
            return Err(ApiError::NotSignedIn);
        }
        Ok(self.with_auth(req))
    }

    /// Sends the request and applies the server's `success` envelope.
    async fn send(&self, req: RequestBuilder) -> Result<Value, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(v) => v,
                Err(e) if status.is_success() => return Err(ApiError::Decode(e.to_string())),
                Err(_) => Value::Null,
            }
        };

        if !status.is_success() {
            let message = extract_message(&body).unwrap_or_else(|| format!("HTTP {}", status));
            log::warn!("request failed with {}: {}", status, message);
            return Err(ApiError::Status { status: status.as_u16(), message });
        }
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let message = rejection_message(&body).unwrap_or_else(|| "Request failed".to_string());
            return Err(ApiError::Rejected(message));
        }
        Ok(body)
    }

    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let req = self.authed(self.http.get(self.endpoint(path)?))?;
        self.send(req).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let req = self.authed(self.http.post(self.endpoint(path)?).json(body))?;
        self.send(req).await
    }

    async fn post_public<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let req = self.http.post(self.endpoint(path)?).json(body);
        self.send(req).await
    }

    async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let req = self.authed(self.http.put(self.endpoint(path)?).json(body))?;
        self.send(req).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let req = self.authed(self.http.delete(self.endpoint(path)?))?;
        self.send(req).await
    }

    // ---- auth ----

    pub async fn login(&self, mobile: &str, password: &str, login_type: &str) -> Result<LoginResponse, ApiError> {
        let body = json!({ "mobile": mobile, "password": password, "login_type": login_type });
        let resp: LoginResponse = decode(self.post_public("login/", &body).await?)?;
        if resp.token.as_deref().is_none_or(str::is_empty) {
            return Err(ApiError::Rejected("Login failed: Invalid credentials".into()));
        }
        Ok(resp)
    }

    pub async fn signup(&self, req: &SignupRequest) -> Result<SignupResponse, ApiError> {
        decode(self.post_public("signup/", req).await?)
    }

    /// Returns the server's confirmation message.
    pub async fn send_otp(&self, mobile: &str, purpose: OtpPurpose) -> Result<String, ApiError> {
        let body = json!({ "mobile": mobile, "type": purpose.as_str() });
        Ok(message_of(&self.post_public("send-otp/", &body).await?))
    }

    pub async fn verify_otp(&self, mobile: &str, otp: &str) -> Result<(), ApiError> {
        self.post_public("verify-otp/", &json!({ "mobile": mobile, "otp": otp })).await?;
        Ok(())
    }

    pub async fn forgot_password(&self, mobile: &str) -> Result<String, ApiError> {
        Ok(message_of(&self.post_public("forgot-password/", &json!({ "mobile": mobile })).await?))
    }

    pub async fn reset_password(&self, mobile: &str, otp: &str, new_password: &str) -> Result<(), ApiError> {
        let body = json!({ "mobile": mobile, "otp": otp, "new_password": new_password });
        let resp = self.post_public("reset-password/", &body).await?;
        if resp.get("success").and_then(Value::as_bool) != Some(true) {
            return Err(ApiError::Rejected("Password reset failed".into()));
        }
        Ok(())
    }

    pub async fn mobile_login_otp(&self, mobile: &str) -> Result<(), ApiError> {
        self.post_public("mobile-login-otp/", &json!({ "mobile": mobile })).await?;
        Ok(())
    }

    pub async fn verify_mobile_otp(&self, mobile: &str, otp: &str) -> Result<(), ApiError> {
        self.post_public("verify-mobile-otp/", &json!({ "mobile": mobile, "otp": otp })).await?;
        Ok(())
    }

    /// Sets the password for a mobile-only account and returns the new session token.
    pub async fn set_mobile_password(&self, mobile: &str, password: &str) -> Result<String, ApiError> {
        let body = json!({ "mobile": mobile, "password": password });
        let resp = self.post_public("set-mobile-password/", &body).await?;
        resp.get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ApiError::Decode("token missing from response".into()))
    }

    // ---- profile & family ----

    pub async fn profile(&self) -> Result<Profile, ApiError> {
        decode(self.get("profile/edit/").await?)
    }

    /// Replaces the personal fields and the whole family member list.
    pub async fn save_profile(
        &self,
        personal: &serde_json::Map<String, Value>,
        family: &[Value],
        avatar: Option<UploadFile>,
    ) -> Result<String, ApiError> {
        let mut form = Form::new();
        for (key, value) in personal {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            form = form.text(key.clone(), text);
        }
        form = form.text("family_members", serde_json::to_string(family).map_err(|e| ApiError::Decode(e.to_string()))?);
        if let Some(file) = avatar {
            form = form.part("avatar", Part::bytes(file.bytes).file_name(file.file_name));
        }
        let req = self.authed(self.http.post(self.endpoint("profile/edit/")?).multipart(form))?;
        Ok(message_of(&self.send(req).await?))
    }

    pub async fn user_permissions(&self) -> Result<Permissions, ApiError> {
        decode(self.get("user-permissions/").await?)
    }

    pub async fn all_families(&self) -> Result<Vec<Profile>, ApiError> {
        decode(self.get("all-families/").await?)
    }

    pub async fn family_member_family(&self) -> Result<FamilyData, ApiError> {
        field(self.get("family-member/family/").await?, "family_data")
    }

    pub async fn member_logins(&self) -> Result<Vec<MemberLogin>, ApiError> {
        field(self.get("family-members/").await?, "family_members")
    }

    pub async fn available_members(&self) -> Result<Vec<AvailableMember>, ApiError> {
        field(self.get("family-members/available/").await?, "available_members")
    }

    pub async fn register_member_login(
        &self,
        family_member_id: i64,
        mobile_number: &str,
        password: &str,
        full_access: bool,
    ) -> Result<String, ApiError> {
        let body = json!({
            "family_member_id": family_member_id,
            "mobile_number": mobile_number,
            "password": password,
            "full_access": full_access,
        });
        Ok(message_of(&self.post("family-members/register/", &body).await?))
    }

    pub async fn remove_member_login(&self, member_id: i64) -> Result<String, ApiError> {
        Ok(message_of(&self.delete(&format!("family-members/{}/remove-access/", member_id)).await?))
    }

    pub async fn family_profile(&self, profile_id: i64) -> Result<(Profile, Vec<FamilyMember>), ApiError> {
        let body = self.get(&format!("community/profile/{}/", profile_id)).await?;
        let members = body.get("family_members").cloned().unwrap_or(Value::Array(Vec::new()));
        Ok((field(body, "profile")?, decode(members)?))
    }

    pub async fn activities(&self) -> Result<Vec<Activity>, ApiError> {
        decode(self.get("activities/").await?)
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        decode(self.get("dashboard/stats/").await?)
    }

    // ---- connections ----

    pub async fn accepted_connections(&self) -> Result<Vec<Connection>, ApiError> {
        let mut list: Vec<Connection> = field(self.get("community/accepted-connections/").await?, "connections")?;
        list.iter_mut().for_each(|c| c.status = ConnectionStatus::Accepted);
        Ok(list)
    }

    pub async fn pending_requests(&self) -> Result<PendingRequests, ApiError> {
        decode(self.get("community/pending-requests/").await?)
    }

    pub async fn find_connections(&self) -> Result<Vec<Suggestion>, ApiError> {
        field(self.get("community/find-connections/").await?, "suggestions")
    }

    pub async fn connect(&self, receiver_id: i64, message: &str) -> Result<String, ApiError> {
        let body = json!({ "receiver_id": receiver_id, "message": message });
        Ok(message_of(&self.post("community/connect/", &body).await?))
    }

    pub async fn respond_connection(&self, connection_id: i64, action: ConnectionAction) -> Result<String, ApiError> {
        let path = format!("community/connections/{}/respond/", connection_id);
        Ok(message_of(&self.post(&path, &json!({ "action": action })).await?))
    }

    pub async fn remove_connection(&self, connection_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("community/connections/{}/", connection_id)).await?;
        Ok(())
    }

    // ---- messages ----

    pub async fn conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        field(self.get("community/messages/").await?, "conversations")
    }

    pub async fn messages_with(&self, partner_id: i64) -> Result<Vec<Message>, ApiError> {
        field(self.get(&format!("community/messages/?partner_id={}", partner_id)).await?, "messages")
    }

    /// Returns the id the server assigned to the new message.
    pub async fn send_message(&self, receiver_id: i64, message: &str) -> Result<Option<i64>, ApiError> {
        let body = json!({ "receiver_id": receiver_id, "message": message });
        let resp = self.post("community/messages/", &body).await?;
        Ok(resp.get("message_id").and_then(Value::as_i64))
    }

    // ---- events ----

    pub async fn events(&self) -> Result<EventsOverview, ApiError> {
        decode(self.get("community/events/").await?)
    }

    pub async fn create_event(&self, payload: &EventPayload) -> Result<String, ApiError> {
        Ok(message_of(&self.post("community/events/", payload).await?))
    }

    pub async fn update_event(&self, event_id: i64, payload: &EventPayload) -> Result<String, ApiError> {
        Ok(message_of(&self.put(&format!("community/events/{}/", event_id), payload).await?))
    }

    pub async fn delete_event(&self, event_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("community/events/{}/", event_id)).await?;
        Ok(())
    }

    pub async fn event_invitations(&self, event_id: i64) -> Result<Vec<InvitationSummary>, ApiError> {
        field(self.get(&format!("community/events/{}/invitations/", event_id)).await?, "invitations")
    }

    pub async fn invite(&self, event_id: i64, invitee_ids: &[i64]) -> Result<String, ApiError> {
        let body = json!({ "event_id": event_id, "invitee_ids": invitee_ids });
        Ok(message_of(&self.post("community/events/invitations/", &body).await?))
    }

    pub async fn remove_invitation(&self, invitation_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("community/events/invitations/{}/", invitation_id)).await?;
        Ok(())
    }

    pub async fn respond_invitation(&self, invitation_id: i64, response: InvitationStatus) -> Result<String, ApiError> {
        let path = format!("community/events/invitations/{}/respond/", invitation_id);
        Ok(message_of(&self.post(&path, &json!({ "response": response })).await?))
    }

    // ---- admin ----

    pub async fn upload_excel(&self, file: UploadFile) -> Result<UploadSummary, ApiError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")?;
        let form = Form::new().part("file", part);
        let req = self.with_auth(self.http.post(self.endpoint("upload-excel/")?).multipart(form));
        decode(self.send(req).await?)
    }

    /// Fetches a media file such as an avatar. Relative paths resolve against the API host.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let target = self.base.join(url)?;
        let resp = self.http.get(target).send().await?.error_for_status()?;
        Ok(resp.bytes().await?.to_vec())
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn field<T: DeserializeOwned>(mut value: Value, key: &str) -> Result<T, ApiError> {
    match value.get_mut(key) {
        Some(v) => decode(v.take()),
        None => Err(ApiError::Decode(format!("missing `{}`", key))),
    }
}

fn message_of(value: &Value) -> String {
    value.get("message").and_then(Value::as_str).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves one canned response and hands back the raw request it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = sock.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(idx) = text.find("\r\n\r\n") {
                    let len = text
                        .lines()
                        .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(|v| v.trim().to_string()))
                        .and_then(|v| v.parse::<usize>().ok())
                        .unwrap_or(0);
                    if raw.len() >= idx + 4 + len {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let resp = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            sock.write_all(resp.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&raw).to_string()
        });
        (format!("http://{}/api/", addr), handle)
    }

    #[tokio::test]
    async fn sends_token_header_and_decodes_connections() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"success": true, "connections": [{"id": 3, "profile": {"id": 9, "name": "Shah Amit", "city": "Surat", "avatar": null}, "connected_at": "2025-01-02T10:00:00+00:00"}]}"#,
        )
        .await;
        let client = ApiClient::new(&base).unwrap().with_token(Some("tok".into()));
        let list = client.accepted_connections().await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("GET /api/community/accepted-connections/ "));
        assert!(request.to_ascii_lowercase().contains("authorization: token tok"));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].profile.name, "Shah Amit");
        assert_eq!(list[0].status, ConnectionStatus::Accepted);
    }

    #[tokio::test]
    async fn success_false_becomes_rejection() {
        let (base, server) = serve_once("200 OK", r#"{"success": false, "message": "You can only message connected families"}"#).await;
        let client = ApiClient::new(&base).unwrap().with_token(Some("tok".into()));
        let err = client.send_message(4, "hi").await.unwrap_err();
        let request = server.await.unwrap();

        assert!(request.contains("\"receiver_id\":4"));
        assert!(matches!(err, ApiError::Rejected(_)));
        assert_eq!(err.user_message(), "You can only message connected families");
    }

    #[tokio::test]
    async fn http_error_surfaces_server_message() {
        let (base, server) = serve_once("401 Unauthorized", r#"{"success": false, "message": "Invalid mobile number or password"}"#).await;
        let client = ApiClient::new(&base).unwrap();
        let err = client.login("+919999999999", "nope", "user").await.unwrap_err();
        server.await.unwrap();

        match err {
            ApiError::Status { status, ref message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid mobile number or password");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_without_token_is_rejected() {
        let (base, server) = serve_once("200 OK", r#"{"success": true, "message": "ok"}"#).await;
        let client = ApiClient::new(&base).unwrap();
        let err = client.login("9876543210", "pw", "admin").await.unwrap_err();
        server.await.unwrap();
        assert_eq!(err.user_message(), "Login failed: Invalid credentials");
    }

    #[tokio::test]
    async fn rejection_reads_message_before_error() {
        let (base, server) =
            serve_once("200 OK", r#"{"success": false, "message": "Event is full", "error": "capacity"}"#).await;
        let client = ApiClient::new(&base).unwrap().with_token(Some("tok".into()));
        let err = client.respond_invitation(5, InvitationStatus::Accepted).await.unwrap_err();
        server.await.unwrap();
        assert_eq!(err.user_message(), "Event is full");
    }

    #[tokio::test]
    async fn signup_created_decodes_display_number() {
        let (base, server) = serve_once(
            "201 Created",
            r#"{"message": "User and profile created successfully. Welcome email sent!", "user_number": "A5", "full_name": "Patel Ramesh Kanubhai"}"#,
        )
        .await;
        let client = ApiClient::new(&base).unwrap();
        let req = SignupRequest {
            first_name: "Patel".into(),
            middle_name: "Ramesh".into(),
            last_name: "Kanubhai".into(),
            sakh: String::new(),
            email: "ramesh@example.com".into(),
            mobile: "+919876543210".into(),
            username: "+919876543210".into(),
            password: "secret1".into(),
        };
        let resp = client.signup(&req).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /api/signup/ "));
        assert_eq!(resp.user_number.as_deref(), Some("A5"));
        assert_eq!(resp.full_name.as_deref(), Some("Patel Ramesh Kanubhai"));
    }

    #[tokio::test]
    async fn profile_edit_payload_decodes() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"id": 11, "surname": "Shah", "name": "Mira", "fatherName": "Nilesh", "mobileNumber": "+919812345678",
                "avatar": "/media/avatars/mira.png", "dateOfBirth": null, "age": 34,
                "user_type": "main_user", "is_read_only": false, "user_number": "A12",
                "signup_surname": "Shah", "signup_mobileNumber": "+919812345678",
                "family_members": [
                    {"id": 2, "surname": "Shah", "name": "Dev", "relation": "son", "memberAge": 8, "member_number": "007"},
                    {"id": 3, "surname": "Shah", "name": "Asha", "relation": "mother", "memberAge": null, "member_number": "008"}
                ]}"#,
        )
        .await;
        let client = ApiClient::new(&base).unwrap().with_token(Some("tok".into()));
        let profile = client.profile().await.unwrap();
        server.await.unwrap();

        assert_eq!(profile.user_number.as_deref(), Some("A12"));
        assert_eq!(profile.family_members.len(), 2);
        assert_eq!(profile.family_members[0].member_number.as_deref(), Some("007"));
        assert_eq!(profile.family_members[1].relation, Relation::Mother);
        assert_eq!(profile.family_members[1].member_age, None);
    }

    #[tokio::test]
    async fn excel_upload_sends_file_part() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"message": "done", "records_created": 4, "records_skipped": 2, "total_database_records": 30}"#,
        )
        .await;
        let client = ApiClient::new(&base).unwrap().with_token(Some("tok".into()));
        let file = UploadFile { file_name: "members.xlsx".into(), bytes: b"PK-sheet".to_vec() };
        let summary = client.upload_excel(file).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /api/upload-excel/ "));
        assert!(request.to_ascii_lowercase().contains("content-type: multipart/form-data; boundary="));
        assert!(request.contains(r#"name="file"; filename="members.xlsx""#));
        assert!(request.contains("PK-sheet"));
        assert_eq!(summary.records_created, 4);
        assert_eq!(summary.total_database_records, 30);
    }

    #[tokio::test]
    async fn profile_save_sends_text_parts_and_family_json() {
        let (base, server) = serve_once("200 OK", r#"{"success": true, "message": "Profile updated successfully!"}"#).await;
        let client = ApiClient::new(&base).unwrap().with_token(Some("tok".into()));
        let mut personal = serde_json::Map::new();
        personal.insert("surname".into(), json!("Shah"));
        personal.insert("fatherName".into(), json!("Nilesh"));
        let family = vec![json!({"surname": "Shah", "relation": "son"})];
        let message = client.save_profile(&personal, &family, None).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /api/profile/edit/ "));
        assert!(request.contains("name=\"surname\"\r\n\r\nShah\r\n"));
        assert!(request.contains("name=\"fatherName\"\r\n\r\nNilesh\r\n"));
        assert!(request.contains(r#"name="family_members""#));
        assert!(request.contains(r#"[{"relation":"son","surname":"Shah"}]"#));
        assert!(!request.contains(r#"name="avatar""#));
        assert_eq!(message, "Profile updated successfully!");
    }

    #[tokio::test]
    async fn authed_calls_need_a_token() {
        let client = ApiClient::new("http://127.0.0.1:9/api/").unwrap();
        let err = client.dashboard_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::NotSignedIn));
    }

    #[test]
    fn endpoint_joins_relative_to_api_root() {
        let client = ApiClient::new("http://localhost:8000/api/").unwrap();
        let url = client.endpoint("community/events/12/invitations/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/community/events/12/invitations/");
        let url = client.endpoint("/login/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/login/");
    }
}
