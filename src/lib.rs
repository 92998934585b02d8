#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::db::{establish_connection_pool, run_migrations};
#[cfg(feature = "server")]
use crate::events::{EventPublisher, LogPublisher};
#[cfg(feature = "server")]
use crate::mail::{LogMailer, MailTemplates, Mailer, ZmqMailer};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::zmq::ZmqPublisher;

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod events;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod mail;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod zmq;

/// Registers every API handler. Literal paths come before `{id}` siblings.
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    use crate::routes::{
        auth, campaigns, companies, contact_lists, contacts, flows, quick_messages, schedules,
        settings, tags, tickets, users,
    };

    cfg.app_data(routes::json_config())
        .app_data(routes::query_config())
        .service(auth::signup)
        .service(auth::login)
        .service(auth::recover_password)
        .service(auth::reset_password)
        .service(companies::list_companies)
        .service(companies::show_company)
        .service(companies::update_company)
        .service(companies::delete_company)
        .service(users::list_users)
        .service(users::list_simple)
        .service(users::update_tickets_width)
        .service(users::upload_profile_image)
        .service(users::show_user)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(settings::list_settings)
        .service(settings::update_setting)
        .service(settings::list_campaign_settings)
        .service(settings::save_campaign_settings)
        .service(tags::list_tags)
        .service(tags::list_all_tags)
        .service(tags::list_kanban_tags)
        .service(tags::show_tag)
        .service(tags::create_tag)
        .service(tags::update_tag)
        .service(tags::delete_tag)
        .service(contacts::list_contacts)
        .service(contacts::import_contacts)
        .service(contacts::block_contact)
        .service(contacts::show_contact)
        .service(contacts::create_contact)
        .service(contacts::update_contact)
        .service(contacts::delete_contact)
        .service(tickets::list_tickets)
        .service(tickets::kanban)
        .service(tickets::move_to_lane)
        .service(tickets::clear_lanes)
        .service(tickets::show_ticket)
        .service(tickets::create_ticket)
        .service(tickets::update_ticket)
        .service(tickets::delete_ticket)
        .service(campaigns::list_campaigns)
        .service(campaigns::cancel_campaign)
        .service(campaigns::restart_campaign)
        .service(campaigns::show_campaign)
        .service(campaigns::create_campaign)
        .service(campaigns::update_campaign)
        .service(campaigns::delete_campaign)
        .service(schedules::list_schedules)
        .service(schedules::show_schedule)
        .service(schedules::create_schedule)
        .service(schedules::update_schedule)
        .service(schedules::delete_schedule)
        .service(quick_messages::list_quick_messages)
        .service(quick_messages::show_quick_message)
        .service(quick_messages::create_quick_message)
        .service(quick_messages::update_quick_message)
        .service(quick_messages::delete_quick_message)
        .service(contact_lists::list_contact_lists)
        .service(contact_lists::list_all_contact_lists)
        .service(contact_lists::import_contact_list_items)
        .service(contact_lists::show_contact_list)
        .service(contact_lists::create_contact_list)
        .service(contact_lists::update_contact_list)
        .service(contact_lists::delete_contact_list)
        .service(contact_lists::list_contact_list_items)
        .service(contact_lists::show_contact_list_item)
        .service(contact_lists::create_contact_list_item)
        .service(contact_lists::update_contact_list_item)
        .service(contact_lists::delete_contact_list_item)
        .service(flows::list_flows)
        .service(flows::create_flow)
        .service(flows::update_flow)
        .service(flows::duplicate_flow)
        .service(flows::save_flow_graph)
        .service(flows::show_flow)
        .service(flows::delete_flow);
}

/// Realtime publisher for the configured endpoint, or a logging stand-in.
#[cfg(feature = "server")]
fn start_event_publisher(endpoint: &str) -> Arc<dyn EventPublisher> {
    match ZmqPublisher::start(endpoint) {
        Ok(publisher) => Arc::new(publisher),
        Err(e) => {
            log::warn!("Realtime events disabled, failed to start publisher on {endpoint}: {e}");
            Arc::new(LogPublisher)
        }
    }
}

#[cfg(feature = "server")]
fn start_mailer(endpoint: &str) -> Arc<dyn Mailer> {
    match ZmqPublisher::start(endpoint) {
        Ok(publisher) => Arc::new(ZmqMailer::new(Arc::new(publisher))),
        Err(e) => {
            log::warn!("Outbound mail disabled, failed to start publisher on {endpoint}: {e}");
            Arc::new(LogMailer)
        }
    }
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let events = web::Data::from(start_event_publisher(&server_config.zmq_events_pub));
    let mailer = web::Data::from(start_mailer(&server_config.zmq_emailer_pub));

    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;
    run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

    let repo = DieselRepository::new(pool);

    let templates = web::Data::new(
        MailTemplates::new()
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?,
    );

    std::fs::create_dir_all(&server_config.public_dir)?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/public", &server_config.public_dir))
            .configure(configure)
            .app_data(web::Data::new(repo.clone()))
            .app_data(events.clone())
            .app_data(mailer.clone())
            .app_data(templates.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
