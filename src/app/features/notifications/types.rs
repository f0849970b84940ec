//! Membership tree handed to the notification editors:
//! organization -> project -> production environment -> survey.

use serde::Serialize;

use crate::app::domain::OrganizationRole;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub role: OrganizationRole,
    pub organization: MembershipOrganization,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipOrganization {
    pub id: String,
    pub name: String,
    pub projects: Vec<MembershipProject>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipProject {
    pub id: String,
    pub name: String,
    /// Production environments only.
    pub environments: Vec<MembershipEnvironment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipEnvironment {
    pub id: String,
    pub surveys: Vec<MembershipSurvey>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipSurvey {
    pub id: String,
    pub name: String,
}

impl MembershipProject {
    /// Surveys across all of the project's production environments.
    pub fn surveys(&self) -> impl Iterator<Item = &MembershipSurvey> {
        self.environments.iter().flat_map(|e| e.surveys.iter())
    }
}

pub fn contains_organization(memberships: &[Membership], organization_id: &str) -> bool {
    memberships.iter().any(|m| m.organization.id == organization_id)
}

pub fn contains_project(memberships: &[Membership], project_id: &str) -> bool {
    memberships
        .iter()
        .flat_map(|m| m.organization.projects.iter())
        .any(|p| p.id == project_id)
}

pub fn contains_survey(memberships: &[Membership], survey_id: &str) -> bool {
    memberships
        .iter()
        .flat_map(|m| m.organization.projects.iter())
        .flat_map(|p| p.surveys())
        .any(|s| s.id == survey_id)
}
