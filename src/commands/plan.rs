//! `pup plan` commands.

use super::{Output, to_json};
use crate::app::{PupCrawl, ShareLink};
use crate::models::Plan;
use crate::share::{self, Clipboard};
use crate::{Error, Result};
use serde::Serialize;

fn plan_not_found(id: &str) -> Error {
    Error::NotFound(format!("Plan not found: {}", id))
}

fn require_plan<'a>(app: &'a PupCrawl, id: &str) -> Result<&'a Plan> {
    app.plan(id).ok_or_else(|| plan_not_found(id))
}

/// One stop of a plan, resolved against the location store.
#[derive(Serialize)]
pub struct PlanStop {
    pub position: usize,
    pub id: String,
    /// `None` when the location no longer exists
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct PlanDetail {
    #[serde(flatten)]
    pub plan: Plan,
    pub stops: Vec<PlanStop>,
}

impl Output for PlanDetail {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        let plan = &self.plan;
        let mut lines = vec![format!("{} ({})", plan.name, plan.id)];
        lines.push(format!("  Created: {}", plan.created_at.format("%Y-%m-%d %H:%M")));
        if let Some(code) = &plan.share_code {
            lines.push(format!("  Share code: {}", code));
        }
        if let Some(notes) = &plan.notes {
            lines.push(format!("  Notes: {}", notes));
        }
        if self.stops.is_empty() {
            lines.push("  No stops yet. Add one with `pup plan add`.".to_string());
        }
        for stop in &self.stops {
            let name = stop.name.as_deref().unwrap_or("(missing location)");
            lines.push(format!("  {}. {} ({})", stop.position, name, stop.id));
        }
        lines.join("\n")
    }
}

fn detail(app: &PupCrawl, id: &str) -> Result<PlanDetail> {
    let plan = require_plan(app, id)?;
    let stops = plan
        .locations
        .iter()
        .enumerate()
        .map(|(position, id)| PlanStop {
            position,
            id: id.clone(),
            name: app.location(id).map(|l| l.name.clone()),
        })
        .collect();
    Ok(PlanDetail {
        plan: plan.clone(),
        stops,
    })
}

/// Create a plan.
pub fn create(app: &mut PupCrawl, name: &str) -> Result<PlanDetail> {
    let id = match app.create_plan(name)? {
        Some(plan) => plan.id.clone(),
        None => return Err(Error::InvalidInput("Plan name cannot be empty".to_string())),
    };
    detail(app, &id)
}

#[derive(Serialize)]
pub struct PlanSummary {
    pub id: String,
    pub name: String,
    pub stops: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_code: Option<String>,
}

#[derive(Serialize)]
pub struct PlanList {
    pub count: usize,
    pub plans: Vec<PlanSummary>,
}

impl Output for PlanList {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        if self.plans.is_empty() {
            return "No plans. Create one with `pup plan create <name>`.".to_string();
        }
        let mut lines = vec![format!("{} plan(s)", self.count)];
        for plan in &self.plans {
            lines.push(format!("  {}  {} ({} stops)", plan.id, plan.name, plan.stops));
        }
        lines.join("\n")
    }
}

pub fn list(app: &PupCrawl) -> PlanList {
    let plans: Vec<PlanSummary> = app
        .plans()
        .all()
        .iter()
        .map(|p| PlanSummary {
            id: p.id.clone(),
            name: p.name.clone(),
            stops: p.locations.len(),
            share_code: p.share_code.clone(),
        })
        .collect();
    PlanList {
        count: plans.len(),
        plans,
    }
}

pub fn show(app: &PupCrawl, id: &str) -> Result<PlanDetail> {
    detail(app, id)
}

/// Result of a plan mutation that may be a no-op.
#[derive(Serialize)]
pub struct PlanUpdated {
    pub changed: bool,
    #[serde(flatten)]
    pub detail: PlanDetail,
}

impl Output for PlanUpdated {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        let prefix = if self.changed { "Updated" } else { "No change to" };
        format!("{} {}", prefix, self.detail.to_human())
    }
}

fn updated(app: &PupCrawl, id: &str, changed: bool) -> Result<PlanUpdated> {
    Ok(PlanUpdated {
        changed,
        detail: detail(app, id)?,
    })
}

/// Add a location to a plan.
pub fn add(app: &mut PupCrawl, plan_id: &str, location_id: &str) -> Result<PlanUpdated> {
    require_plan(app, plan_id)?;
    if app.location(location_id).is_none() {
        return Err(Error::NotFound(format!("Location not found: {}", location_id)));
    }
    let changed = app.add_to_plan(plan_id, location_id)?;
    updated(app, plan_id, changed)
}

pub fn remove(app: &mut PupCrawl, plan_id: &str, location_id: &str) -> Result<PlanUpdated> {
    require_plan(app, plan_id)?;
    let changed = app.remove_from_plan(plan_id, location_id)?;
    updated(app, plan_id, changed)
}

/// Move a stop. Out-of-range positions leave the plan unchanged.
pub fn move_stop(app: &mut PupCrawl, plan_id: &str, from: usize, to: usize) -> Result<PlanUpdated> {
    require_plan(app, plan_id)?;
    let changed = app.reorder_plan(plan_id, from, to)?;
    updated(app, plan_id, changed)
}

pub fn notes(app: &mut PupCrawl, plan_id: &str, text: &str) -> Result<PlanUpdated> {
    require_plan(app, plan_id)?;
    let changed = app.set_plan_notes(plan_id, text)?;
    updated(app, plan_id, changed)
}

pub fn rename(app: &mut PupCrawl, plan_id: &str, name: &str) -> Result<PlanUpdated> {
    require_plan(app, plan_id)?;
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("Plan name cannot be empty".to_string()));
    }
    let changed = app.rename_plan(plan_id, name)?;
    updated(app, plan_id, changed)
}

#[derive(Serialize)]
pub struct PlanDeleted {
    pub id: String,
    pub deleted: bool,
}

impl Output for PlanDeleted {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        format!("Deleted plan {}", self.id)
    }
}

pub fn delete(app: &mut PupCrawl, plan_id: &str) -> Result<PlanDeleted> {
    if !app.delete_plan(plan_id)? {
        return Err(plan_not_found(plan_id));
    }
    Ok(PlanDeleted {
        id: plan_id.to_string(),
        deleted: true,
    })
}

impl Output for ShareLink {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        if self.copied {
            format!("{}\n(copied to clipboard)", self.url)
        } else {
            self.url.clone()
        }
    }
}

/// Generate a share link. With no clipboard, the link is only printed.
pub fn share(
    app: &mut PupCrawl,
    plan_id: &str,
    origin: &str,
    clipboard: Option<&mut dyn Clipboard>,
) -> Result<ShareLink> {
    let link = match clipboard {
        Some(clipboard) => app.share_plan(plan_id, origin, clipboard)?,
        None => app.generate_share_code(plan_id)?.map(|code| ShareLink {
            url: share::share_url(origin, &code),
            code,
            copied: false,
        }),
    };
    link.ok_or_else(|| plan_not_found(plan_id))
}

#[derive(Serialize)]
pub struct PlanOpened {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanDetail>,
}

impl Output for PlanOpened {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        match &self.plan {
            Some(detail) => detail.to_human(),
            None => "No plan with that share code on this device".to_string(),
        }
    }
}

/// Open a plan from a share link. An unknown code is not an error.
pub fn open(app: &mut PupCrawl, link: &str) -> Result<PlanOpened> {
    let id = app.open_shared(link).map(|plan| plan.id.clone());
    let plan = id.map(|id| detail(app, &id)).transpose()?;
    Ok(PlanOpened {
        found: plan.is_some(),
        plan,
    })
}

#[derive(Serialize)]
pub struct DirectionsExport {
    pub plan_id: String,
    /// Empty when none of the plan's stops resolve
    pub url: String,
}

impl Output for DirectionsExport {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        if self.url.is_empty() {
            "Plan has no stops to route through".to_string()
        } else {
            self.url.clone()
        }
    }
}

pub fn export(app: &PupCrawl, plan_id: &str, base_url: &str) -> Result<DirectionsExport> {
    let url = app
        .export_directions(plan_id, base_url)
        .ok_or_else(|| plan_not_found(plan_id))?;
    Ok(DirectionsExport {
        plan_id: plan_id.to_string(),
        url,
    })
}
