mod config;
mod constants;
mod errors;
mod handlers;
mod models;
mod openapi;
mod repositories;
mod routes;
mod scheduler;
mod services;
mod utils;
mod validators;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{info, warn};

use crate::config::CONFIG;
use crate::repositories::{SettingsRepository, TaskRepository, TemplateRepository};
use crate::scheduler::ReminderScheduler;
use crate::services::{
    FileService, Mailer, ReminderService, SettingsService, SmtpMailer, TaskService,
    TemplateService, UnconfiguredMailer,
};

fn build_mailer() -> Arc<dyn Mailer> {
    if !CONFIG.smtp_configured() {
        warn!("SMTP_HOST is not set; outreach emails will fail until it is configured");
        return Arc::new(UnconfiguredMailer);
    }
    match SmtpMailer::from_config(&CONFIG) {
        Ok(mailer) => Arc::new(mailer),
        Err(e) => {
            warn!("Invalid SMTP configuration ({}); outreach emails disabled", e);
            Arc::new(UnconfiguredMailer)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    info!("Using data directory {}", CONFIG.data_dir.display());
    std::fs::create_dir_all(CONFIG.upload_dir())?;

    // Initialize repositories and services
    let file_service = Arc::new(FileService::new());
    let task_service = Arc::new(TaskService::new(
        Arc::new(TaskRepository::new(CONFIG.tasks_file())),
        file_service.clone(),
    ));
    let settings_service = Arc::new(SettingsService::new(Arc::new(SettingsRepository::new(
        CONFIG.settings_file(),
    ))));
    let template_service = Arc::new(TemplateService::new(Arc::new(TemplateRepository::new(
        CONFIG.templates_file(),
    ))));

    let owner_address = if CONFIG.mail_from.is_empty() {
        CONFIG.smtp_username.clone()
    } else {
        CONFIG.mail_from.clone()
    };
    let reminder_service = Arc::new(ReminderService::new(
        task_service.clone(),
        settings_service.clone(),
        template_service.clone(),
        file_service.clone(),
        build_mailer(),
        Some(owner_address),
    ));

    // Make sure the settings document exists before the first tick
    if let Err(e) = settings_service.get_settings() {
        warn!("Could not initialise reminder settings: {}", e);
    }

    if CONFIG.scheduler_enabled {
        ReminderScheduler::new(
            settings_service.clone(),
            reminder_service.clone(),
            CONFIG.scheduler_interval_secs,
        )
        .run();
    } else {
        info!("Reminder scheduler disabled (SCHEDULER_ENABLED=false)");
    }

    let file_data = web::Data::from(file_service);
    let task_data = web::Data::from(task_service);
    let settings_data = web::Data::from(settings_service);
    let template_data = web::Data::from(template_service);
    let reminder_data = web::Data::from(reminder_service);

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(file_data.clone())
            .app_data(task_data.clone())
            .app_data(settings_data.clone())
            .app_data(template_data.clone())
            .app_data(reminder_data.clone())
            .configure(routes::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
