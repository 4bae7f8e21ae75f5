// SPDX-License-Identifier: Apache-2.0

//! Authentication feature module.
//!
//! Backed by the `better-auth` npm package. The interactive configuration
//! picks sign-in methods (email/password plus social providers) and optional
//! better-auth plugins; provider credentials are referenced as
//! `process.env.*` expressions so no secret ever lands in the configuration
//! document.

use crate::domain::{EnvVarSpec, ModuleManifest, ModuleName, ModuleValue, Result};
use crate::ports::{FeatureModule, Prompter};
use std::fs;
use std::path::Path;
use tracing::info;

const AUTH_CONFIG_FILE: &str = "modules/auth/auth.config.ts";

/// Social providers offered during configuration, as
/// `(label, provider key, env prefix)`.
const SOCIAL_PROVIDERS: &[(&str, &str, &str)] = &[
    ("Google", "google", "GOOGLE"),
    ("GitHub", "github", "GITHUB"),
    ("Discord", "discord", "DISCORD"),
];

/// Optional better-auth plugins offered during configuration, as
/// `(label, config key)`.
const PLUGINS: &[(&str, &str)] = &[
    ("Two-factor authentication (TOTP)", "twoFactor"),
    ("Email OTP codes", "emailOTP"),
    ("OAuth proxy for development", "oAuthProxy"),
    ("Admin panel", "adminPanel"),
];

/// The authentication feature: better-auth with a MongoDB adapter.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthModule;

impl AuthModule {
    /// Creates the auth module descriptor.
    pub fn new() -> Self {
        AuthModule
    }
}

impl FeatureModule for AuthModule {
    fn name(&self) -> ModuleName {
        ModuleName::new_unchecked("auth")
    }

    fn summary(&self) -> &str {
        "User authentication via better-auth (email/password and social logins)"
    }

    fn packages(&self) -> &[&str] {
        &["better-auth"]
    }

    fn manifest(&self) -> ModuleManifest {
        let mut manifest = ModuleManifest::new(self.name())
            .with_var(EnvVarSpec::required(
                "BETTER_AUTH_SECRET",
                "Secret used to sign sessions",
            ))
            .with_var(
                EnvVarSpec::optional("BETTER_AUTH_URL", "Base URL of the auth server")
                    .with_default("http://localhost:3000"),
            )
            .with_var(EnvVarSpec::required(
                "MONGODB_URI",
                "MongoDB connection string",
            ))
            .with_var(EnvVarSpec::optional(
                "RESEND_API_KEY",
                "Resend API key for transactional email",
            ));
        for (label, _, prefix) in SOCIAL_PROVIDERS {
            manifest = manifest
                .with_var(EnvVarSpec::optional(
                    format!("{}_CLIENT_ID", prefix),
                    format!("{} OAuth client id", label),
                ))
                .with_var(EnvVarSpec::optional(
                    format!("{}_CLIENT_SECRET", prefix),
                    format!("{} OAuth client secret", label),
                ));
        }
        manifest
    }

    fn default_config(&self) -> ModuleValue {
        ModuleValue::object([
            ("enabled", ModuleValue::Bool(true)),
            ("loginPath", ModuleValue::string("/auth/signin")),
            ("emailAndPassword", ModuleValue::Bool(true)),
        ])
    }

    fn configure(&self, prompter: &mut dyn Prompter) -> Result<ModuleValue> {
        let mut options = vec!["Email and password".to_string()];
        options.extend(SOCIAL_PROVIDERS.iter().map(|(label, _, _)| label.to_string()));

        let picked = prompter.multi_select("Select authentication methods", &options)?;
        if picked.is_empty() {
            return Ok(self.default_config());
        }

        let mut entries = vec![
            ("enabled".to_string(), ModuleValue::Bool(true)),
            ("loginPath".to_string(), ModuleValue::string("/auth/signin")),
        ];
        if picked.contains(&0) {
            entries.push(("emailAndPassword".to_string(), ModuleValue::Bool(true)));
        }

        let mut providers = Vec::new();
        for index in &picked {
            if *index == 0 {
                continue;
            }
            let (_, key, prefix) = SOCIAL_PROVIDERS[index - 1];
            providers.push((
                key.to_string(),
                ModuleValue::object([
                    ("clientId", ModuleValue::env(format!("{}_CLIENT_ID", prefix))),
                    (
                        "clientSecret",
                        ModuleValue::env(format!("{}_CLIENT_SECRET", prefix)),
                    ),
                ]),
            ));
        }
        if !providers.is_empty() {
            entries.push(("socialProviders".to_string(), ModuleValue::Object(providers)));
        }

        let plugin_options: Vec<String> =
            PLUGINS.iter().map(|(label, _)| label.to_string()).collect();
        let plugins = prompter.multi_select("Select better-auth plugins", &plugin_options)?;
        if !plugins.is_empty() {
            let configs: Vec<(String, ModuleValue)> = plugins
                .iter()
                .map(|&index| {
                    let (_, key) = PLUGINS[index];
                    (key.to_string(), plugin_config(key))
                })
                .collect();
            entries.push(("betterAuthPlugins".to_string(), ModuleValue::Object(configs)));
        }
        Ok(ModuleValue::Object(entries))
    }

    fn is_scaffolded(&self, project_root: &Path) -> bool {
        project_root.join(AUTH_CONFIG_FILE).exists()
    }

    fn scaffold(&self, project_root: &Path, _prompter: &mut dyn Prompter) -> Result<()> {
        let path = project_root.join(AUTH_CONFIG_FILE);
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, auth_config_source())?;
        info!(file = %path.display(), "auth server config created");
        Ok(())
    }

    fn teardown(&self, project_root: &Path) -> Result<()> {
        let path = project_root.join(AUTH_CONFIG_FILE);
        if path.exists() {
            fs::remove_file(&path)?;
            info!("removed auth server config");
        }
        Ok(())
    }
}

/// Default configuration for a selected better-auth plugin.
fn plugin_config(key: &str) -> ModuleValue {
    match key {
        "twoFactor" => ModuleValue::object([
            ("enabled", ModuleValue::Bool(true)),
            ("issuer", ModuleValue::string("app")),
            (
                "otpOptions",
                ModuleValue::object([
                    ("period", ModuleValue::number(30)),
                    ("digits", ModuleValue::number(6)),
                ]),
            ),
        ]),
        "emailOTP" => ModuleValue::object([
            ("enabled", ModuleValue::Bool(true)),
            ("expiresIn", ModuleValue::number(300)),
            (
                "sendVerificationOTP",
                ModuleValue::object([("provider", ModuleValue::string("resend"))]),
            ),
        ]),
        "adminPanel" => ModuleValue::object([
            ("enabled", ModuleValue::Bool(true)),
            ("adminEmails", ModuleValue::Raw("[]".to_string())),
        ]),
        _ => ModuleValue::object([("enabled", ModuleValue::Bool(true))]),
    }
}

fn auth_config_source() -> &'static str {
    "import { betterAuth } from \"better-auth\"\n\
     import { mongodbAdapter } from \"better-auth/adapters/mongodb\"\n\
     import { MongoClient } from \"mongodb\"\n\n\
     const client = new MongoClient(process.env.MONGODB_URI as string)\n\n\
     export const auth = betterAuth({\n\
     \x20 database: mongodbAdapter(client.db()),\n\
     \x20 emailAndPassword: {\n\
     \x20   enabled: true\n\
     \x20 },\n\
     \x20 secret: process.env.BETTER_AUTH_SECRET as string,\n\
     \x20 baseURL: process.env.BETTER_AUTH_URL || 'http://localhost:3000',\n\
     \x20 trustedOrigins: [process.env.BETTER_AUTH_URL || 'http://localhost:3000']\n\
     })\n"
}
