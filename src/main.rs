//! API server entry point.
//!
//! Loads configuration, wires the Postgres stores and the Razorpay, Resend
//! and JWT adapters into the application handlers, and serves the router
//! until Ctrl-C or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use learnhub::adapters::http::{api_router, ApiState, CheckoutAppState, HttpSettings, ProgressAppState};
use learnhub::adapters::{
    BackgroundNotificationDispatcher, JwtSessionValidator, PostgresCourseCatalog,
    PostgresEnrollmentJournal, PostgresProgressRepository, PostgresStudentDirectory,
    RazorpayConfig, RazorpayGateway, ResendConfig, ResendMailer,
};
use learnhub::application::{
    CreateOrderHandler, EnrollmentEngine, GetCourseProgressHandler, ReconcileEnrollmentsHandler,
    SendPaymentReceiptHandler, UpdateCourseProgressHandler, VerifyPaymentHandler,
};
use learnhub::config::AppConfig;
use learnhub::domain::checkout::{Currency, SignatureVerifier};
use learnhub::ports::{
    CourseCatalog, CourseProgressRepository, EnrollmentJournal, Mailer, NotificationDispatcher,
    PaymentGateway, SessionValidator, StudentDirectory,
};

/// How long pending notifications may take to flush on shutdown.
const NOTIFICATION_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    init_tracing(&config);

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Connected to database");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run migrations")?;
        tracing::info!("Migrations completed");
    }

    // Stores
    let catalog: Arc<dyn CourseCatalog> = Arc::new(PostgresCourseCatalog::new(pool.clone()));
    let directory: Arc<dyn StudentDirectory> = Arc::new(PostgresStudentDirectory::new(pool.clone()));
    let journal: Arc<dyn EnrollmentJournal> = Arc::new(PostgresEnrollmentJournal::new(pool.clone()));
    let progress: Arc<dyn CourseProgressRepository> =
        Arc::new(PostgresProgressRepository::new(pool.clone()));

    // Outbound services
    let payment = &config.payment;
    let gateway: Arc<dyn PaymentGateway> = Arc::new(
        RazorpayGateway::new(
            RazorpayConfig::new(&payment.razorpay_key_id, payment.razorpay_key_secret.clone())
                .with_base_url(&payment.api_base_url)
                .with_timeout(payment.provider_timeout()),
        )
        .context("failed to build Razorpay client")?,
    );

    let email = &config.email;
    let mailer: Arc<dyn Mailer> = Arc::new(
        ResendMailer::new(
            ResendConfig::new(
                email.resend_api_key.clone(),
                &email.from_email,
                &email.from_name,
            )
            .with_base_url(&email.api_base_url),
        )
        .context("failed to build Resend client")?,
    );

    let (dispatcher, notification_worker) =
        BackgroundNotificationDispatcher::spawn(mailer.clone(), email.queue_capacity);
    let notifier: Arc<dyn NotificationDispatcher> = Arc::new(dispatcher);

    let validator: Arc<dyn SessionValidator> =
        Arc::new(JwtSessionValidator::new(&config.auth.jwt_secret));

    // Application handlers
    let currency = Currency::new(&payment.currency).context("invalid payment currency")?;
    let engine = Arc::new(EnrollmentEngine::new(
        catalog.clone(),
        directory.clone(),
        notifier.clone(),
        payment.enrollment_timeout(),
    ));

    let reconciler = payment.reconcile_interval().map(|period| {
        let handler = ReconcileEnrollmentsHandler::new(engine.clone(), journal.clone());
        let limit = payment.reconcile_batch_size;
        tracing::info!(?period, limit, "Enrollment reconciliation enabled");
        tokio::spawn(async move { handler.run_every(period, limit).await })
    });

    let state = ApiState {
        checkout: CheckoutAppState {
            create_order: Arc::new(CreateOrderHandler::new(
                catalog.clone(),
                gateway,
                currency,
                payment.provider_timeout(),
            )),
            verify_payment: Arc::new(VerifyPaymentHandler::new(
                SignatureVerifier::new(payment.razorpay_key_secret.clone()),
                engine,
                journal,
            )),
            send_receipt: Arc::new(SendPaymentReceiptHandler::new(directory, mailer)),
        },
        progress: ProgressAppState {
            update_progress: Arc::new(UpdateCourseProgressHandler::new(catalog, progress.clone())),
            get_progress: Arc::new(GetCourseProgressHandler::new(progress)),
        },
        auth: validator,
    };

    let settings = HttpSettings {
        cors_origins: config.server.cors_header_values()?,
        request_timeout: config.server.request_timeout(),
    };
    let app = api_router(state, &settings);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, environment = ?config.server.environment, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // The reconciler's engine holds a dispatcher handle too.
    if let Some(task) = reconciler {
        task.abort();
        let _ = task.await;
    }

    // The router owned the other dispatcher handles; dropping ours closes the queue.
    drop(notifier);
    if tokio::time::timeout(NOTIFICATION_DRAIN_TIMEOUT, notification_worker)
        .await
        .is_err()
    {
        tracing::warn!("Notification queue did not drain before shutdown");
    }

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
