// SPDX-License-Identifier: Apache-2.0

//! Organizations feature module.
//!
//! Multi-tenant organizations on top of the auth module's better-auth
//! stack. Configuration is a structured object covering limits, invitation
//! policy, and the optional teams feature; there is no file scaffolding,
//! the module is configuration only.

use crate::domain::{ModuleManifest, ModuleName, ModuleValue, Result};
use crate::ports::{FeatureModule, Prompter};

const DEFAULT_ORGANIZATION_LIMIT: i64 = 5;
const DEFAULT_MEMBERSHIP_LIMIT: i64 = 100;
// 48 hours, in seconds.
const INVITATION_EXPIRES_IN: i64 = 172_800;
const INVITATION_LIMIT: i64 = 50;

/// The organizations feature: multi-tenant workspaces with invitations
/// and optional teams.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrganizationsModule;

impl OrganizationsModule {
    /// Creates the organizations module descriptor.
    pub fn new() -> Self {
        OrganizationsModule
    }
}

impl FeatureModule for OrganizationsModule {
    fn name(&self) -> ModuleName {
        ModuleName::new_unchecked("organizations")
    }

    fn summary(&self) -> &str {
        "Multi-tenant organizations with invitations and teams"
    }

    fn packages(&self) -> &[&str] {
        &["better-auth"]
    }

    fn manifest(&self) -> ModuleManifest {
        // Shares the auth module's environment; nothing of its own.
        ModuleManifest::new(self.name())
    }

    fn default_config(&self) -> ModuleValue {
        build_config(
            DEFAULT_ORGANIZATION_LIMIT,
            DEFAULT_MEMBERSHIP_LIMIT,
            "owner",
            false,
        )
    }

    fn configure(&self, prompter: &mut dyn Prompter) -> Result<ModuleValue> {
        let organization_limit = numeric_answer(
            prompter,
            "Organizations per user (default: 5): ",
            DEFAULT_ORGANIZATION_LIMIT,
        )?;
        let membership_limit = numeric_answer(
            prompter,
            "Members per organization (default: 100): ",
            DEFAULT_MEMBERSHIP_LIMIT,
        )?;

        let role_answer = prompter
            .input("Creator role (owner/admin, default: owner): ")?
            .to_lowercase();
        let creator_role = match role_answer.as_str() {
            "admin" => "admin",
            _ => "owner",
        };

        let teams = prompter.confirm("Enable teams inside organizations?")?;
        Ok(build_config(
            organization_limit,
            membership_limit,
            creator_role,
            teams,
        ))
    }
}

fn numeric_answer(prompter: &mut dyn Prompter, question: &str, default: i64) -> Result<i64> {
    let answer = prompter.input(question)?;
    Ok(answer.parse().unwrap_or(default))
}

fn build_config(
    organization_limit: i64,
    membership_limit: i64,
    creator_role: &str,
    teams: bool,
) -> ModuleValue {
    let teams_config = if teams {
        ModuleValue::object([
            ("enabled", ModuleValue::Bool(true)),
            ("maximumTeams", ModuleValue::number(10)),
            ("allowRemovingAllTeams", ModuleValue::Bool(false)),
        ])
    } else {
        ModuleValue::object([
            ("enabled", ModuleValue::Bool(false)),
            ("maximumTeams", ModuleValue::number(5)),
            ("allowRemovingAllTeams", ModuleValue::Bool(true)),
        ])
    };

    ModuleValue::object([
        ("enabled", ModuleValue::Bool(true)),
        ("showInNavigation", ModuleValue::Bool(true)),
        ("listUrl", ModuleValue::string("/organizations")),
        ("createUrl", ModuleValue::string("/organizations/create")),
        ("dashboardUrl", ModuleValue::string("/organizations/dashboard")),
        ("allowUserToCreateOrganization", ModuleValue::Bool(true)),
        ("organizationLimit", ModuleValue::number(organization_limit)),
        ("membershipLimit", ModuleValue::number(membership_limit)),
        ("creatorRole", ModuleValue::string(creator_role)),
        ("invitationExpiresIn", ModuleValue::number(INVITATION_EXPIRES_IN)),
        ("invitationLimit", ModuleValue::number(INVITATION_LIMIT)),
        ("cancelPendingInvitationsOnReInvite", ModuleValue::Bool(true)),
        ("teams", teams_config),
        ("roles", default_roles()),
    ])
}

/// The built-in role map. Permission lists are emitted as verbatim array
/// text; the engine never interprets them.
fn default_roles() -> ModuleValue {
    ModuleValue::object([
        (
            "owner",
            ModuleValue::object([
                ("name", ModuleValue::string("Owner")),
                ("permissions", ModuleValue::Raw("[\"*\"]".to_string())),
            ]),
        ),
        (
            "admin",
            ModuleValue::object([
                ("name", ModuleValue::string("Administrator")),
                (
                    "permissions",
                    ModuleValue::Raw(
                        "[\"organization:read\", \"organization:update\", \"member:invite\", \
                         \"member:remove\", \"member:update-role\"]"
                            .to_string(),
                    ),
                ),
            ]),
        ),
        (
            "member",
            ModuleValue::object([
                ("name", ModuleValue::string("Member")),
                (
                    "permissions",
                    ModuleValue::Raw("[\"organization:read\", \"team:read\"]".to_string()),
                ),
            ]),
        ),
    ])
}
