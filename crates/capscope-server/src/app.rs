//! Application assembly: seeds the backend and builds the router.

use std::collections::HashMap;

use anyhow::{Context, bail};
use axum::Router;
use capscope_auth::secret::hash_client_secret;
use capscope_auth::store::{ApplicationStore, UserStore};
use capscope_auth::types::{Application, Capability, Group, ProtectedRule, User};
use capscope_memory::MemoryBackend;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::ServerConfig;

/// Builds the full application router over a freshly seeded in-memory
/// backend.
pub async fn build_router(config: &ServerConfig) -> anyhow::Result<Router> {
    let backend = MemoryBackend::new();
    seed_backend(&backend, config).await?;

    let state = backend.auth_state(config.auth.clone());
    Ok(capscope_auth::router(state).layer(TraceLayer::new_for_http()))
}

/// Provisions groups, capabilities, users, and applications from the
/// `[seed]` config tables.
///
/// Groups are created first so capabilities and users can reference them by
/// name; applications go last so capability assignments resolve.
pub async fn seed_backend(backend: &MemoryBackend, config: &ServerConfig) -> anyhow::Result<()> {
    let seed = &config.seed;

    let mut group_ids: HashMap<String, Uuid> = HashMap::new();
    for entry in &seed.groups {
        let group = backend
            .capabilities
            .insert_group(Group::new(entry.name.clone()))
            .await;
        group_ids.insert(entry.name.clone(), group.id);
    }

    let mut capability_ids: HashMap<String, Uuid> = HashMap::new();
    for entry in &seed.capabilities {
        let rules = entry
            .rules
            .iter()
            .map(|r| ProtectedRule::new(r.method.clone(), r.path_pattern.clone()))
            .collect();
        let mut capability = Capability::new(entry.name.clone(), rules).with_default(entry.default);
        for group_name in &entry.groups {
            let Some(id) = group_ids.get(group_name) else {
                bail!(
                    "capability {:?} references unknown group {group_name:?}",
                    entry.name
                );
            };
            capability = capability.with_group(*id);
        }
        let capability = backend.capabilities.insert(capability).await;
        capability_ids.insert(entry.name.clone(), capability.id);
    }

    let mut user_ids: HashMap<String, Uuid> = HashMap::new();
    for entry in &seed.users {
        let mut user = User::new(entry.username.clone());
        if let Some(organization) = &entry.organization {
            user = user.with_organization(organization.clone());
        }
        for group_name in &entry.groups {
            let Some(id) = group_ids.get(group_name) else {
                bail!(
                    "user {:?} references unknown group {group_name:?}",
                    entry.username
                );
            };
            user = user.with_group(*id);
        }
        let user = backend
            .users
            .create(&user)
            .await
            .with_context(|| format!("seeding user {:?}", entry.username))?;
        user_ids.insert(entry.username.clone(), user.id);
    }

    for entry in &seed.applications {
        let mut application = Application::new(
            entry.client_id.clone(),
            entry.name.clone(),
            entry.grant_type,
        );
        if let Some(secret) = &entry.client_secret {
            let hash = hash_client_secret(secret)
                .with_context(|| format!("hashing secret for {:?}", entry.client_id))?;
            application = application.with_secret_hash(hash);
        }
        for uri in &entry.redirect_uris {
            application = application.with_redirect_uri(uri.clone());
        }
        if let Some(owner) = &entry.owner {
            let Some(id) = user_ids.get(owner) else {
                bail!(
                    "application {:?} references unknown owner {owner:?}",
                    entry.client_id
                );
            };
            application = application.with_owner(*id);
        }
        for capability_name in &entry.capabilities {
            let Some(id) = capability_ids.get(capability_name) else {
                bail!(
                    "application {:?} references unknown capability {capability_name:?}",
                    entry.client_id
                );
            };
            application = application.with_capability(*id);
        }
        application.logo_uri = entry.logo_uri.clone();
        application.tos_uri = entry.tos_uri.clone();
        application.policy_uri = entry.policy_uri.clone();
        application.contacts = entry.contacts.clone();

        backend
            .applications
            .create(&application)
            .await
            .with_context(|| format!("seeding application {:?}", entry.client_id))?;
    }

    tracing::info!(
        groups = seed.groups.len(),
        capabilities = seed.capabilities.len(),
        users = seed.users.len(),
        applications = seed.applications.len(),
        "Seed data provisioned"
    );
    Ok(())
}
