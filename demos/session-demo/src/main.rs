use std::sync::Arc;
use std::time::Duration;

use sprintdesk::prelude::*;
use sprintdesk::telemetry;
use sprintdesk_protocol::CurrentUserResponse;
use tracing::info;

/// A 12-second session at four ticks per second: notice at 8, modal at 4.
const DEMO_CONFIG: &str = r#"{
    "countdown": {
        "total_secs": 12,
        "warning_secs": 8,
        "modal_secs": 4,
        "activity_reset_after_secs": 2,
        "notice_duration_ms": 2000,
        "tick_interval_ms": 250
    },
    "log_filter": "sprintdesk=debug,sprintdesk_countdown=debug,session_demo=info"
}"#;

// ---------------------------------------------------------------------------
// Shell stand-ins
// ---------------------------------------------------------------------------

/// Answers "who is this?" for any token with the demo user.
struct DemoIdentity {
    user: UserIdentity,
}

impl IdentityProvider for DemoIdentity {
    async fn current_user(&self, token: &str) -> Result<Vec<u8>, SessionError> {
        info!(token, "GET /auth/me");
        serde_json::to_vec(&CurrentUserResponse::from(self.user.clone()))
            .map_err(|e| SessionError::IdentityFetch(e.to_string()))
    }
}

/// Prints what a browser would show.
struct Console;

impl Navigator for Console {
    fn navigate(&self, path: &str) {
        info!(path, "navigate");
    }
}

impl Notifier for Console {
    fn notice(&self, notice: Notice) {
        info!(title = %notice.title, description = ?notice.description, "notice");
    }

    fn show_modal(&self, modal: ModalDescriptor) {
        let actions: Vec<_> = modal.actions.iter().map(|a| a.label()).collect();
        info!(title = %modal.title, body = %modal.body, ?actions, "modal shown");
    }

    fn hide_modal(&self) {
        info!("modal hidden");
    }
}

fn demo_user() -> UserIdentity {
    UserIdentity {
        id: UserId("demo-1".into()),
        email: "demo@sprintdesk.dev".into(),
        first_name: "Demo".into(),
        last_name: "User".into(),
        role: Role::ScrumMaster,
        organization_id: OrganizationId("demo-org".into()),
    }
}

fn build_portal(
    config: &PortalConfig,
    credentials: &Arc<FileCredentialStore>,
) -> Portal<DemoIdentity> {
    PortalBuilder::new(credentials.clone(), Arc::new(Console), Arc::new(Console))
        .config(config.clone())
        .build(DemoIdentity { user: demo_user() })
}

// ---------------------------------------------------------------------------
// Walkthrough
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => PortalConfig::from_path(path)?,
        None => PortalConfig::from_json_str(DEMO_CONFIG)?,
    };
    telemetry::init(&config.log_filter);

    let path = std::env::temp_dir().join("sprintdesk-demo-credentials.json");
    let credentials = Arc::new(FileCredentialStore::new(&path));
    let tick = Duration::from_millis(config.countdown.tick_interval_ms);

    // 1. Sign in, then "reload": a fresh process state over the same file.
    {
        let portal = build_portal(&config, &credentials);
        portal.sign_in(demo_user(), "demo-token", Some("demo-refresh"))?;
    }
    info!(path = %path.display(), "credentials persisted, simulating reload");

    let portal = build_portal(&config, &credentials);
    let Some(page) = portal.open_protected().await else {
        return Err("guard rejected the persisted session".into());
    };
    info!(user = %page.user.display_name(), role = %page.user.role, "protected page open");

    // 2. Interact once the reset window has passed.
    tokio::time::sleep(tick * (config.countdown.activity_reset_after_secs as u32 + 1)).await;
    portal.activity().emit(ActivityKind::KeyDown);
    tokio::time::sleep(tick / 4).await;
    let snap = page.countdown().snapshot().await?;
    info!(remaining = %snap.display, "after key press");

    // 3. Wait for the modal, then press "Extend Session".
    loop {
        tokio::time::sleep(tick).await;
        if page.countdown().snapshot().await?.modal_visible {
            break;
        }
    }
    page.countdown().extend_session().await?;
    info!("pressed Extend Session");

    // 4. Walk away and let it expire.
    let mut session = portal.store().subscribe();
    session.wait_for(|state| !state.is_authenticated).await?;
    info!(
        token_left = credentials.get("token")?.is_some(),
        "session ended"
    );

    page.close().await;
    info!(listeners = portal.activity().listener_count(), "page closed");
    Ok(())
}
