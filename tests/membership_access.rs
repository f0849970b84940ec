//! Visibility rules of the SQLite membership source.

use std::collections::BTreeSet;

use surveyhub::app::domain::{EnvironmentType, OrganizationRole};
use surveyhub::app::db;
use surveyhub::app::domain::ProjectId;
use surveyhub::app::features::notifications::{
    fetch_tree, Membership, MembershipSource, SqliteMembershipSource,
};

mod common;

use crate::common::*;

fn project_ids(membership: &Membership) -> BTreeSet<String> {
    membership
        .organization
        .projects
        .iter()
        .map(|p| p.id.clone())
        .collect()
}

#[tokio::test]
async fn user_without_organizations_gets_empty_list() {
    let pool = test_pool().await;
    let user = create_user(&pool, None).await;

    let memberships = SqliteMembershipSource::new(pool).fetch(&user).await.unwrap();
    assert!(memberships.is_empty());
}

#[tokio::test]
async fn owner_sees_every_project() {
    let pool = test_pool().await;
    let user = create_user(&pool, None).await;
    let org = create_org(&pool, "Acme").await;
    add_member(&pool, &org, &user, OrganizationRole::Owner).await;
    let p1 = create_project(&pool, &org, "One").await;
    let p2 = create_project(&pool, &org, "Two").await;

    let memberships = SqliteMembershipSource::new(pool).fetch(&user).await.unwrap();

    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0].role, OrganizationRole::Owner);
    assert_eq!(memberships[0].organization.id, org.as_str());
    assert_eq!(memberships[0].organization.name, "Acme");
    assert_eq!(
        project_ids(&memberships[0]),
        BTreeSet::from([p1.as_str(), p2.as_str()])
    );
}

#[tokio::test]
async fn manager_sees_every_project() {
    let pool = test_pool().await;
    let user = create_user(&pool, None).await;
    let org = create_org(&pool, "Acme").await;
    add_member(&pool, &org, &user, OrganizationRole::Manager).await;
    let p1 = create_project(&pool, &org, "One").await;
    let p2 = create_project(&pool, &org, "Two").await;

    let memberships = SqliteMembershipSource::new(pool).fetch(&user).await.unwrap();

    assert_eq!(memberships.len(), 1);
    assert_eq!(
        project_ids(&memberships[0]),
        BTreeSet::from([p1.as_str(), p2.as_str()])
    );
}

#[tokio::test]
async fn member_sees_only_team_projects() {
    let pool = test_pool().await;
    let user = create_user(&pool, None).await;
    let org = create_org(&pool, "Acme").await;
    add_member(&pool, &org, &user, OrganizationRole::Member).await;
    let shared = create_project(&pool, &org, "Shared").await;
    let _hidden = create_project(&pool, &org, "Hidden").await;
    grant_team_access(&pool, &org, &user, &shared).await;

    let memberships = SqliteMembershipSource::new(pool).fetch(&user).await.unwrap();

    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0].role, OrganizationRole::Member);
    assert_eq!(project_ids(&memberships[0]), BTreeSet::from([shared.as_str()]));
}

#[tokio::test]
async fn member_without_team_access_is_excluded() {
    let pool = test_pool().await;
    let user = create_user(&pool, None).await;
    let org = create_org(&pool, "Acme").await;
    add_member(&pool, &org, &user, OrganizationRole::Member).await;
    create_project(&pool, &org, "Hidden").await;

    let memberships = SqliteMembershipSource::new(pool).fetch(&user).await.unwrap();
    assert!(memberships.is_empty());
}

#[tokio::test]
async fn other_users_team_access_does_not_leak() {
    let pool = test_pool().await;
    let user = create_user(&pool, None).await;
    let colleague = create_user(&pool, None).await;
    let org = create_org(&pool, "Acme").await;
    add_member(&pool, &org, &user, OrganizationRole::Member).await;
    add_member(&pool, &org, &colleague, OrganizationRole::Member).await;
    let project = create_project(&pool, &org, "Theirs").await;
    grant_team_access(&pool, &org, &colleague, &project).await;

    let source = SqliteMembershipSource::new(pool);
    assert!(source.fetch(&user).await.unwrap().is_empty());
    assert_eq!(source.fetch(&colleague).await.unwrap().len(), 1);
}

#[tokio::test]
async fn billing_membership_is_excluded_even_with_team_access() {
    let pool = test_pool().await;
    let user = create_user(&pool, None).await;
    let org = create_org(&pool, "Acme").await;
    add_member(&pool, &org, &user, OrganizationRole::Billing).await;
    let project = create_project(&pool, &org, "Billing view").await;
    grant_team_access(&pool, &org, &user, &project).await;

    let memberships = SqliteMembershipSource::new(pool).fetch(&user).await.unwrap();
    assert!(memberships.is_empty());
}

#[tokio::test]
async fn only_production_environments_and_their_surveys_are_included() {
    let pool = test_pool().await;
    let user = create_user(&pool, None).await;
    let workspace = single_survey_workspace(&pool, &user, OrganizationRole::Owner).await;
    let development =
        create_environment(&pool, &workspace.project, EnvironmentType::Development).await;
    create_survey(&pool, &development, "Draft").await;

    let memberships = SqliteMembershipSource::new(pool).fetch(&user).await.unwrap();

    let project = &memberships[0].organization.projects[0];
    assert_eq!(project.name, "Website");
    assert_eq!(project.environments.len(), 1);
    assert_eq!(project.environments[0].id, workspace.environment.as_str());
    let surveys = &project.environments[0].surveys;
    assert_eq!(surveys.len(), 1);
    assert_eq!(surveys[0].id, workspace.survey.as_str());
    assert_eq!(surveys[0].name, "Onboarding");
}

#[tokio::test]
async fn project_without_production_environment_is_still_listed() {
    let pool = test_pool().await;
    let user = create_user(&pool, None).await;
    let org = create_org(&pool, "Acme").await;
    add_member(&pool, &org, &user, OrganizationRole::Owner).await;
    let project = create_project(&pool, &org, "Fresh").await;
    create_environment(&pool, &project, EnvironmentType::Development).await;

    let memberships = SqliteMembershipSource::new(pool).fetch(&user).await.unwrap();

    let projects = &memberships[0].organization.projects;
    assert_eq!(projects.len(), 1);
    assert!(projects[0].environments.is_empty());
}

#[tokio::test]
async fn memberships_span_organizations_with_different_roles() {
    let pool = test_pool().await;
    let user = create_user(&pool, None).await;
    let owned = create_org(&pool, "Owned").await;
    add_member(&pool, &owned, &user, OrganizationRole::Owner).await;
    create_project(&pool, &owned, "Owned project").await;

    let partner = create_org(&pool, "Partner").await;
    add_member(&pool, &partner, &user, OrganizationRole::Member).await;
    let shared = create_project(&pool, &partner, "Shared").await;
    create_project(&pool, &partner, "Not shared").await;
    grant_team_access(&pool, &partner, &user, &shared).await;

    let memberships = SqliteMembershipSource::new(pool).fetch(&user).await.unwrap();

    assert_eq!(memberships.len(), 2);
    let partner_membership = memberships
        .iter()
        .find(|m| m.organization.id == partner.as_str())
        .expect("partner org visible");
    assert_eq!(project_ids(partner_membership), BTreeSet::from([shared.as_str()]));
    let owned_membership = memberships
        .iter()
        .find(|m| m.organization.id == owned.as_str())
        .expect("owned org visible");
    assert_eq!(owned_membership.organization.projects.len(), 1);
}

#[tokio::test]
async fn tree_is_read_through_the_callers_transaction() {
    let pool = test_pool().await;
    let user = create_user(&pool, None).await;
    let org = create_org(&pool, "Acme").await;
    add_member(&pool, &org, &user, OrganizationRole::Owner).await;
    let committed = create_project(&pool, &org, "Committed").await;

    let mut tx = pool.begin().await.unwrap();
    let pending = ProjectId::new();
    db::projects::insert(
        &mut *tx,
        &db::projects::NewProject {
            id: pending.clone(),
            organization_id: org.clone(),
            name: "Pending".to_string(),
        },
    )
    .await
    .unwrap();

    let memberships = fetch_tree(&mut *tx, &user).await.unwrap();
    assert_eq!(
        project_ids(&memberships[0]),
        BTreeSet::from([committed.as_str(), pending.as_str()])
    );
    tx.rollback().await.unwrap();

    let memberships = SqliteMembershipSource::new(pool).fetch(&user).await.unwrap();
    assert_eq!(project_ids(&memberships[0]), BTreeSet::from([committed.as_str()]));
}
