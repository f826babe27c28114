//! Reminders: due-date and follow-up scan over already-loaded records.
//!
//! Tickets, tasks, deals and projects that are still open and fall due
//! within the horizon become overdue / urgent / upcoming reminders. Leads
//! still `new` or `contacted` after the follow-up delay become follow-ups.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, info};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub id: i64,
    pub title: String,
    #[serde(default = "default_ticket_status")]
    pub status: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: i64,
    pub title: String,
    #[serde(default = "default_task_status")]
    pub status: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRecord {
    pub id: i64,
    pub title: String,
    #[serde(default = "default_deal_stage")]
    pub stage: String,
    #[serde(default)]
    pub expected_close_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_project_status")]
    pub status: String,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_lead_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// Column defaults of the business schema
fn default_ticket_status() -> String {
    "open".to_string()
}

fn default_task_status() -> String {
    "todo".to_string()
}

fn default_deal_stage() -> String {
    "prospecting".to_string()
}

fn default_project_status() -> String {
    "active".to_string()
}

fn default_lead_status() -> String {
    "new".to_string()
}

/// Records loaded from the business database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    #[serde(default)]
    pub tickets: Vec<TicketRecord>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub deals: Vec<DealRecord>,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub leads: Vec<LeadRecord>,
}

/// Record type a reminder points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    Ticket,
    Task,
    Deal,
    Project,
    Lead,
}

impl ReminderKind {
    pub fn label(&self) -> &'static str {
        match self {
            ReminderKind::Ticket => "ticket",
            ReminderKind::Task => "task",
            ReminderKind::Deal => "deal",
            ReminderKind::Project => "project",
            ReminderKind::Lead => "lead",
        }
    }
}

/// Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderPriority {
    Overdue,
    Urgent,
    Upcoming,
    FollowUp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// `<type>-<itemId>`
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: ReminderPriority,
    pub item_id: i64,
}

/// Time windows controlling which records raise reminders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindows {
    /// How far ahead a due date raises a reminder
    pub horizon: Duration,
    /// Due dates closer than this are urgent
    pub urgent: Duration,
    /// Open leads older than this need a follow-up
    pub follow_up_after: Duration,
}

impl Default for ReminderWindows {
    fn default() -> Self {
        Self {
            horizon: Duration::hours(48),
            urgent: Duration::hours(24),
            follow_up_after: Duration::hours(48),
        }
    }
}

struct Cutoffs {
    now: DateTime<Utc>,
    urgent: DateTime<Utc>,
    horizon: DateTime<Utc>,
}

impl Cutoffs {
    /// Priority and wording for a due date, or `None` beyond the horizon.
    fn classify(&self, due: DateTime<Utc>) -> Option<(ReminderPriority, &'static str)> {
        if due > self.horizon {
            None
        } else if due <= self.now {
            Some((ReminderPriority::Overdue, "now"))
        } else if due <= self.urgent {
            Some((ReminderPriority::Urgent, "tomorrow"))
        } else {
            Some((ReminderPriority::Upcoming, "soon"))
        }
    }
}

fn dated_reminder(
    cutoffs: &Cutoffs,
    kind: ReminderKind,
    item_id: i64,
    due: Option<DateTime<Utc>>,
    title: impl FnOnce() -> String,
    description: impl FnOnce(&str) -> String,
) -> Option<Reminder> {
    let due = due?;
    let (priority, when) = cutoffs.classify(due)?;
    Some(Reminder {
        id: format!("{}-{}", kind.label(), item_id),
        kind,
        title: title(),
        description: description(when),
        due_date: Some(due),
        priority,
        item_id,
    })
}

/// `now + delta`, clamped to the representable range
fn shift_forward(now: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    now.checked_add_signed(delta).unwrap_or(if delta < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// `now - delta`, clamped to the representable range
fn shift_back(now: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    now.checked_sub_signed(delta).unwrap_or(if delta < Duration::zero() {
        DateTime::<Utc>::MAX_UTC
    } else {
        DateTime::<Utc>::MIN_UTC
    })
}

fn reminder_order(a: &Reminder, b: &Reminder) -> Ordering {
    a.priority.cmp(&b.priority).then_with(|| match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    })
}

/// Collect the reminders due as of `now`, most pressing first.
pub fn collect_reminders(
    snapshot: &WorkspaceSnapshot,
    now: DateTime<Utc>,
    windows: &ReminderWindows,
) -> Vec<Reminder> {
    let cutoffs = Cutoffs {
        now,
        urgent: shift_forward(now, windows.urgent),
        horizon: shift_forward(now, windows.horizon),
    };
    let follow_up_cutoff = shift_back(now, windows.follow_up_after);
    let mut reminders = Vec::new();

    for ticket in &snapshot.tickets {
        if matches!(ticket.status.as_str(), "resolved" | "closed") {
            continue;
        }
        reminders.extend(dated_reminder(
            &cutoffs,
            ReminderKind::Ticket,
            ticket.id,
            ticket.due_date,
            || format!("Ticket Due: {}", ticket.title),
            |when| format!("Ticket #{} is due {}", ticket.id, when),
        ));
    }

    for task in &snapshot.tasks {
        if matches!(task.status.as_str(), "completed" | "cancelled") {
            continue;
        }
        reminders.extend(dated_reminder(
            &cutoffs,
            ReminderKind::Task,
            task.id,
            task.due_date,
            || format!("Task Due: {}", task.title),
            |when| format!("Task \"{}\" is due {}", task.title, when),
        ));
    }

    for deal in &snapshot.deals {
        if matches!(deal.stage.as_str(), "closed_won" | "closed_lost") {
            continue;
        }
        reminders.extend(dated_reminder(
            &cutoffs,
            ReminderKind::Deal,
            deal.id,
            deal.expected_close_date,
            || format!("Deal Expected Close: {}", deal.title),
            |when| format!("Deal \"{}\" is expected to close {}", deal.title, when),
        ));
    }

    for project in &snapshot.projects {
        if matches!(project.status.as_str(), "completed" | "cancelled") {
            continue;
        }
        reminders.extend(dated_reminder(
            &cutoffs,
            ReminderKind::Project,
            project.id,
            project.end_date,
            || format!("Project Due: {}", project.name),
            |when| format!("Project \"{}\" is due {}", project.name, when),
        ));
    }

    for lead in &snapshot.leads {
        if !matches!(lead.status.as_str(), "new" | "contacted") {
            continue;
        }
        // No creation time means "just created".
        let created = lead.created_at.unwrap_or(now);
        if created <= follow_up_cutoff {
            reminders.push(Reminder {
                id: format!("{}-{}", ReminderKind::Lead.label(), lead.id),
                kind: ReminderKind::Lead,
                title: format!("Follow-up Lead: {}", lead.name),
                description: format!(
                    "Lead \"{}\" needs follow-up (no activity for 2+ days)",
                    lead.name
                ),
                due_date: None,
                priority: ReminderPriority::FollowUp,
                item_id: lead.id,
            });
        }
    }

    reminders.sort_by(reminder_order);
    debug!("Collected {} reminders", reminders.len());
    reminders
}

/// Read a JSON workspace snapshot from disk
pub async fn load_snapshot(path: impl AsRef<Path>) -> Result<WorkspaceSnapshot, AppError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await?;
    let snapshot: WorkspaceSnapshot = serde_json::from_str(&raw)?;
    info!(
        "Loaded snapshot {:?}: {} tickets, {} tasks, {} deals, {} projects, {} leads",
        path,
        snapshot.tickets.len(),
        snapshot.tasks.len(),
        snapshot.deals.len(),
        snapshot.projects.len(),
        snapshot.leads.len()
    );
    Ok(snapshot)
}
