use std::sync::{Arc, Mutex};

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use ojos_chat::auth::{AuthenticatedUser, hash_password, issue_token};
use ojos_chat::domain::types::{PlainPassword, Profile};
use ojos_chat::domain::user::User;
use ojos_chat::events::{EventPublisher, RealtimeEvent};
use ojos_chat::mail::{MailError, MailTemplates, Mailer, OutgoingEmail};
use ojos_chat::models::config::ServerConfig;
use ojos_chat::repository::{DieselRepository, UserWriter};

mod common;

const SECRET: &str = "test-secret";

#[derive(Default)]
struct RecordingPublisher {
    events: Mutex<Vec<RealtimeEvent>>,
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: RealtimeEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Default)]
struct Outbox {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl Mailer for Outbox {
    fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

struct Harness {
    db: common::TestDb,
    events: Arc<RecordingPublisher>,
    outbox: Arc<Outbox>,
    config: ServerConfig,
}

impl Harness {
    fn new(name: &str) -> Self {
        let db = common::TestDb::new(name);
        let public_dir = std::env::temp_dir().join("ojos-chat-test-public");
        Self {
            db,
            events: Arc::new(RecordingPublisher::default()),
            outbox: Arc::new(Outbox::default()),
            config: ServerConfig {
                address: "127.0.0.1".to_string(),
                port: 0,
                database_url: String::new(),
                secret: SECRET.to_string(),
                token_ttl_hours: 1,
                frontend_url: "http://front.test".to_string(),
                zmq_events_pub: String::new(),
                zmq_emailer_pub: String::new(),
                public_dir: public_dir.to_string_lossy().into_owned(),
                demo: false,
                trial_days: 3,
            },
        }
    }

    fn repo(&self) -> DieselRepository {
        self.db.repo()
    }

    fn events(&self) -> Vec<RealtimeEvent> {
        std::mem::take(&mut *self.events.events.lock().unwrap())
    }
}

macro_rules! app {
    ($harness:expr) => {{
        let events: Arc<dyn EventPublisher> = $harness.events.clone();
        let mailer: Arc<dyn Mailer> = $harness.outbox.clone();
        test::init_service(
            App::new()
                .configure(ojos_chat::configure)
                .app_data(web::Data::new($harness.repo()))
                .app_data(web::Data::from(events))
                .app_data(web::Data::from(mailer))
                .app_data(web::Data::new(MailTemplates::new().unwrap()))
                .app_data(web::Data::new($harness.config.clone())),
        )
        .await
    }};
}

fn bearer(user: &User) -> (header::HeaderName, String) {
    let claims = AuthenticatedUser::from_user(user, 1);
    let token = issue_token(&claims, SECRET).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_missing_token_is_rejected() {
    let harness = Harness::new("test_missing_token_is_rejected.db");
    let app = app!(harness);

    let req = test::TestRequest::get().uri("/users").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "ERR_SESSION_EXPIRED"}));

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header((header::AUTHORIZATION, "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_signup_then_login() {
    let harness = Harness::new("test_signup_then_login.db");
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({
            "name": "Ana",
            "email": "ana@acme.com",
            "password": "secret123",
            "companyName": "Acme",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["profile"], "admin");
    assert_eq!(body["user"]["companyId"], body["company"]["id"]);
    assert!(body["user"].get("passwordHash").is_none());

    let sent = harness.outbox.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ana@acme.com");

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "ana@acme.com", "password": "wrong-one"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "ana@acme.com", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/users?pageNumber=1")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["hasMore"], false);
    assert_eq!(body["users"][0]["email"], "ana@acme.com");
}

#[actix_web::test]
async fn test_password_recovery_round_trip() {
    let harness = Harness::new("test_password_recovery_round_trip.db");
    let repo = harness.repo();
    let (_, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/auth/recover-password")
        .set_json(json!({"email": "nobody@acme.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(harness.outbox.sent.lock().unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri("/auth/recover-password")
        .set_json(json!({"email": " "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/auth/recover-password")
        .set_json(json!({"email": "admin@acme.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = harness.outbox.sent.lock().unwrap()[0].html.clone();
    let marker = "reset-password?token=";
    let start = html.find(marker).unwrap() + marker.len();
    let token: String = html[start..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit() || *c == '-')
        .collect();

    let req = test::TestRequest::post()
        .uri("/auth/reset-password")
        .set_json(json!({"token": token, "password": "brand-new-1", "confirmPassword": "other"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ERR_PASSWORDS_DO_NOT_MATCH");

    let req = test::TestRequest::post()
        .uri("/auth/reset-password")
        .set_json(json!({"token": token, "password": "brand-new-1", "confirmPassword": "brand-new-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Tokens are single use.
    let req = test::TestRequest::post()
        .uri("/auth/reset-password")
        .set_json(json!({"token": token, "password": "brand-new-1", "confirmPassword": "brand-new-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ERR_INVALID_RESET_TOKEN");

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": admin.email.as_str(), "password": "brand-new-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_agents_cannot_manage_users() {
    let harness = Harness::new("test_agents_cannot_manage_users.db");
    let repo = harness.repo();
    let (acme, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let agent = common::seed_user(&repo, &acme, "Bea", "bea@acme.com");
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(bearer(&agent))
        .set_json(json!({"name": "Caio", "email": "caio@acme.com", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ERR_NO_PERMISSION");

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", admin.id))
        .insert_header(bearer(&agent))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/users/list")
        .insert_header(bearer(&agent))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    assert!(harness.events().is_empty());
}

#[actix_web::test]
async fn test_admin_user_lifecycle_emits_events() {
    let harness = Harness::new("test_admin_user_lifecycle_emits_events.db");
    let repo = harness.repo();
    let (acme, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let (other, _) = common::seed_company(&repo, "Other", "admin@other.com");
    let outsider = common::seed_user(&repo, &other, "Zed", "zed@other.com");
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(bearer(&admin))
        .set_json(json!({"name": "Caio", "email": "caio@acme.com", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["profile"], "user");

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(bearer(&admin))
        .set_json(json!({"name": "Caio", "email": "caio@acme.com", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", outsider.id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", created["id"]))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let events = harness.events();
    assert_eq!(events.len(), 2);
    let event_name = format!("company-{}-user", acme.id);
    assert_eq!(events[0].event, event_name);
    assert_eq!(events[0].payload["action"], "create");
    assert_eq!(events[0].payload["user"]["email"], "caio@acme.com");
    assert_eq!(
        events[1].payload,
        json!({"action": "delete", "userId": created["id"]})
    );
}

#[actix_web::test]
async fn test_tags_and_kanban_lanes() {
    let harness = Harness::new("test_tags_and_kanban_lanes.db");
    let repo = harness.repo();
    let (acme, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/tags")
        .insert_header(bearer(&admin))
        .set_json(json!({"name": "A fazer", "color": "#FF0000", "kanban": true}))
        .to_request();
    let lane: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(lane["color"], "#ff0000");

    let req = test::TestRequest::post()
        .uri("/tags")
        .insert_header(bearer(&admin))
        .set_json(json!({"name": "A fazer", "color": "#00FF00"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ERR_TAG_ALREADY_EXISTS");

    let req = test::TestRequest::post()
        .uri("/contacts")
        .insert_header(bearer(&admin))
        .set_json(json!({"name": "Ana", "number": "5511987654321"}))
        .to_request();
    let contact: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(contact["number"], "+5511987654321");

    let req = test::TestRequest::post()
        .uri("/tickets")
        .insert_header(bearer(&admin))
        .set_json(json!({"contactId": contact["id"], "userId": admin.id}))
        .to_request();
    let ticket: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ticket["status"], "pending");

    let req = test::TestRequest::put()
        .uri(&format!("/ticket-tags/{}/{}", ticket["id"], lane["id"]))
        .insert_header(bearer(&admin))
        .to_request();
    let moved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(moved["tags"][0]["id"], lane["id"]);

    let req = test::TestRequest::get()
        .uri("/ticket/kanban")
        .insert_header(bearer(&admin))
        .to_request();
    let kanban: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(kanban.as_array().unwrap().len(), 1);

    let req = test::TestRequest::put()
        .uri(&format!("/tickets/{}", ticket["id"]))
        .insert_header(bearer(&admin))
        .set_json(json!({"userId": null}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert!(updated["userId"].is_null());
    assert_eq!(updated["status"], "pending");

    let events = harness.events();
    let names: Vec<_> = events.iter().map(|e| e.event.as_str()).collect();
    assert_eq!(
        names,
        vec![
            format!("company-{}-tag", acme.id),
            format!("company-{}-contact", acme.id),
            format!("company-{}-ticket", acme.id),
            format!("company-{}-ticket", acme.id),
            format!("company-{}-ticket", acme.id),
        ]
    );
}

#[actix_web::test]
async fn test_malformed_body_is_reported_as_json() {
    let harness = Harness::new("test_malformed_body_is_reported_as_json.db");
    let repo = harness.repo();
    let (_, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/tags")
        .insert_header(bearer(&admin))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("ERR_INVALID_BODY"));
}

#[actix_web::test]
async fn test_login_refused_for_inactive_company() {
    let harness = Harness::new("test_login_refused_for_inactive_company.db");
    let repo = harness.repo();
    let (acme, _) = common::seed_company(&repo, "Acme", "admin@acme.com");

    let password = PlainPassword::new("secret123").unwrap();
    let mut agent = common::new_user(&acme, "Bea", "bea@acme.com", Profile::User);
    agent.password_hash = hash_password(&password).unwrap();
    repo.create_user(&agent).unwrap();

    {
        use ojos_chat::domain::company::UpdateCompany;
        use ojos_chat::repository::CompanyWriter;
        let updates = UpdateCompany {
            name: acme.name.clone(),
            email: acme.email.clone(),
            phone: None,
            document: None,
            status: false,
            due_date: acme.due_date,
            recurrence: acme.recurrence.clone(),
            plan_id: None,
        };
        repo.update_company(acme.id, &updates).unwrap();
    }

    let app = app!(harness);
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "bea@acme.com", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ERR_COMPANY_INACTIVE");
}

#[actix_web::test]
async fn test_password_with_spaces_logs_in_as_typed() {
    let harness = Harness::new("test_password_with_spaces_logs_in_as_typed.db");
    let repo = harness.repo();
    let (_, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(bearer(&admin))
        .set_json(json!({"name": "Caio", "email": "caio@acme.com", "password": " secret1 "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "caio@acme.com", "password": " secret1 "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "caio@acme.com", "password": "secret1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_huge_page_number_returns_empty_page() {
    let harness = Harness::new("test_huge_page_number_returns_empty_page.db");
    let repo = harness.repo();
    let (_, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let app = app!(harness);

    let req = test::TestRequest::get()
        .uri("/users?pageNumber=1844674407370955161")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["hasMore"], false);
    assert!(body["users"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_flowbuilder_crud_and_duplicate() {
    let harness = Harness::new("test_flowbuilder_crud_and_duplicate.db");
    let repo = harness.repo();
    let (_, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let (_, outsider) = common::seed_company(&repo, "Globex", "admin@globex.com");
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/flowbuilder")
        .insert_header(bearer(&admin))
        .set_json(json!({"name": "Atendimento"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Value = test::read_body_json(resp).await;
    let flow_id = created["id"].as_i64().unwrap();
    assert_eq!(created["active"], true);

    let req = test::TestRequest::post()
        .uri("/flowbuilder/flow")
        .insert_header(bearer(&admin))
        .set_json(json!({"idFlow": flow_id, "nodes": [{"id": "1"}], "connections": []}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri("/flowbuilder")
        .insert_header(bearer(&admin))
        .set_json(json!({"flowId": flow_id, "name": "Atendimento 24h"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/flowbuilder/duplicate")
        .insert_header(bearer(&admin))
        .set_json(json!({"flowId": flow_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let copy: Value = test::read_body_json(resp).await;
    assert_eq!(copy["name"], "Atendimento 24h - copy");
    assert_eq!(copy["flow"]["nodes"][0]["id"], "1");

    let req = test::TestRequest::get()
        .uri("/flowbuilder")
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["flows"].as_array().unwrap().len(), 2);
    assert_eq!(body["hasMore"], false);

    let req = test::TestRequest::delete()
        .uri(&format!("/flowbuilder/{flow_id}"))
        .insert_header(bearer(&outsider))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/flowbuilder/{flow_id}"))
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["message"], "Flow deleted");

    let deleted = harness
        .events()
        .into_iter()
        .rfind(|e| e.event.ends_with("-flowbuilder"))
        .unwrap();
    assert_eq!(deleted.payload, json!({"action": "delete", "flowId": flow_id}));
}

#[actix_web::test]
async fn test_contact_lists_feed_campaign_audience() {
    let harness = Harness::new("test_contact_lists_feed_campaign_audience.db");
    let repo = harness.repo();
    let (acme, admin) = common::seed_company(&repo, "Acme", "admin@acme.com");
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/contact-lists")
        .insert_header(bearer(&admin))
        .set_json(json!({"name": "VIP"}))
        .to_request();
    let list: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let list_id = list["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/contact-list-items")
        .insert_header(bearer(&admin))
        .set_json(json!({"contactListId": list_id, "name": "Ana", "number": "5511999990000"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/contact-list-items")
        .insert_header(bearer(&admin))
        .set_json(json!({"contactListId": list_id, "name": "Ana", "number": "5511999990000"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri("/contact-lists")
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["records"][0]["contactsCount"], 1);
    assert_eq!(body["hasMore"], false);

    let req = test::TestRequest::get()
        .uri(&format!("/contact-list-items?contactListId={list_id}"))
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["contacts"][0]["number"], "+5511999990000");

    let req = test::TestRequest::post()
        .uri("/campaigns")
        .insert_header(bearer(&admin))
        .set_json(json!({"name": "Promo", "message": "Oi", "contactListId": list_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let campaign: Value = test::read_body_json(resp).await;
    assert_eq!(campaign["contactList"]["name"], "VIP");

    let list_events: Vec<_> = harness
        .events()
        .into_iter()
        .filter(|e| e.event == format!("company-{}-ContactList", acme.id.get()))
        .collect();
    assert_eq!(list_events[0].payload["action"], "create");
    assert_eq!(list_events.last().unwrap().payload["record"]["contactsCount"], 1);
}
