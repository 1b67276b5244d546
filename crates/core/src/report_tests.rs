// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::timestamp::parse_utc;

struct TicketFixture<'a> {
    id: &'a str,
    status: Status,
    created_at: &'a str,
    resolved_at: Option<&'a str>,
    sla_deadline: Option<&'a str>,
}

fn ticket(fixture: TicketFixture<'_>) -> Ticket {
    Ticket {
        id: fixture.id.into(),
        display_id: format!("MAN-{}", fixture.id),
        title: "A ticket".into(),
        description: None,
        status: fixture.status,
        is_l3: false,
        created_by: "u-1".into(),
        assigned_to: None,
        category_id: None,
        urgency_id: None,
        category_name: None,
        urgency_label: None,
        urgency_sla_hours: None,
        creator_name: Some("Asha".into()),
        assignee_name: None,
        created_at: fixture.created_at.into(),
        resolved_at: fixture.resolved_at.map(Into::into),
        sla_deadline: fixture.sla_deadline.map(Into::into),
    }
}

fn open_ticket(id: &str, created_at: &str) -> Ticket {
    ticket(TicketFixture {
        id,
        status: Status::New,
        created_at,
        resolved_at: None,
        sla_deadline: None,
    })
}

// Filtering
#[test]
fn filter_by_date_range_is_inclusive() {
    let tickets = vec![
        open_ticket("t-1", "2024-01-01T12:00:00Z"),
        open_ticket("t-2", "2024-01-05T12:00:00Z"),
        open_ticket("t-3", "2024-01-10T12:00:00Z"),
    ];
    let filters = ReportFilters {
        from: Some("2024-01-05".parse().unwrap()),
        to: Some("2024-01-10".parse().unwrap()),
        ..ReportFilters::default()
    };

    let kept = filter_tickets(&tickets, &filters);
    let ids: Vec<_> = kept.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t-2", "t-3"]);
}

#[test]
fn filter_by_agent_matches_creator_or_assignee() {
    let mut created = open_ticket("t-1", "2024-01-01T00:00:00Z");
    created.created_by = "u-7".into();

    let mut assigned = open_ticket("t-2", "2024-01-01T00:00:00Z");
    assigned.assigned_to = Some("u-7".into());

    let unrelated = open_ticket("t-3", "2024-01-01T00:00:00Z");

    let tickets = vec![created, assigned, unrelated];
    let filters = ReportFilters {
        agent_id: Some("u-7".into()),
        ..ReportFilters::default()
    };

    let kept = filter_tickets(&tickets, &filters);
    let ids: Vec<_> = kept.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t-1", "t-2"]);
}

#[test]
fn filter_by_category_and_urgency() {
    let mut matching = open_ticket("t-1", "2024-01-01T00:00:00Z");
    matching.category_id = Some(3);
    matching.urgency_id = Some(1);

    let mut wrong_category = matching.clone();
    wrong_category.id = "t-2".into();
    wrong_category.category_id = Some(4);

    let tickets = vec![matching, wrong_category];
    let filters = ReportFilters {
        category_id: Some(3),
        urgency_id: Some(1),
        ..ReportFilters::default()
    };

    let kept = filter_tickets(&tickets, &filters);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "t-1");
}

#[test]
fn date_filter_excludes_unparseable_created_at() {
    let tickets = vec![
        open_ticket("t-bad", "not-a-date"),
        open_ticket("t-ok", "2024-01-05T00:00:00Z"),
    ];
    let filters = ReportFilters {
        from: Some("2024-01-01".parse().unwrap()),
        ..ReportFilters::default()
    };

    let kept = filter_tickets(&tickets, &filters);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "t-ok");
}

#[test]
fn no_filters_keep_everything() {
    let tickets = vec![
        open_ticket("t-1", "2024-01-01T00:00:00Z"),
        open_ticket("t-bad", "garbage"),
    ];
    let kept = filter_tickets(&tickets, &ReportFilters::default());
    assert_eq!(kept.len(), 2);
}

// Daily created/closed counts
#[test]
fn daily_ticket_counts_split_created_and_closed() {
    let tickets = vec![
        open_ticket("t-1", "2024-01-01T09:00:00Z"),
        open_ticket("t-2", "2024-01-01T17:00:00Z"),
        ticket(TicketFixture {
            id: "t-3",
            status: Status::Closed,
            created_at: "2024-01-01T10:00:00Z",
            resolved_at: Some("2024-01-03T10:00:00Z"),
            sla_deadline: None,
        }),
        // resolved but not closed: no closure counted
        ticket(TicketFixture {
            id: "t-4",
            status: Status::Resolved,
            created_at: "2024-01-02T10:00:00Z",
            resolved_at: Some("2024-01-02T12:00:00Z"),
            sla_deadline: None,
        }),
    ];

    let days = daily_ticket_counts(&tickets);
    assert_eq!(
        days,
        vec![
            DailyTicketCount {
                date: "2024-01-01".parse().unwrap(),
                created: 3,
                closed: 0,
            },
            DailyTicketCount {
                date: "2024-01-02".parse().unwrap(),
                created: 1,
                closed: 0,
            },
            DailyTicketCount {
                date: "2024-01-03".parse().unwrap(),
                created: 0,
                closed: 1,
            },
        ]
    );
}

#[test]
fn daily_ticket_counts_skip_corrupt_rows() {
    let tickets = vec![
        open_ticket("t-bad", "garbage"),
        open_ticket("t-ok", "2024-01-01T00:00:00Z"),
    ];
    let days = daily_ticket_counts(&tickets);
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].created, 1);
}

// SLA breach series
#[test]
fn daily_sla_breaches_percentage() {
    let now = parse_utc("2024-02-01T00:00:00Z").unwrap();
    let tickets = vec![
        // resolved after deadline: breach
        ticket(TicketFixture {
            id: "t-1",
            status: Status::Resolved,
            created_at: "2024-01-01T00:00:00Z",
            resolved_at: Some("2024-01-01T06:00:00Z"),
            sla_deadline: Some("2024-01-01T04:00:00Z"),
        }),
        // resolved in time: no breach
        ticket(TicketFixture {
            id: "t-2",
            status: Status::Resolved,
            created_at: "2024-01-01T01:00:00Z",
            resolved_at: Some("2024-01-01T02:00:00Z"),
            sla_deadline: Some("2024-01-01T05:00:00Z"),
        }),
        // unresolved, deadline passed: breach
        ticket(TicketFixture {
            id: "t-3",
            status: Status::InProgress,
            created_at: "2024-01-01T02:00:00Z",
            resolved_at: None,
            sla_deadline: Some("2024-01-01T06:00:00Z"),
        }),
        // no deadline at all: total only
        open_ticket("t-4", "2024-01-01T03:00:00Z"),
    ];

    let days = daily_sla_breaches(&tickets, now);
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].total, 4);
    assert_eq!(days[0].breaches, 2);
    assert!((days[0].percentage - 50.0).abs() < f64::EPSILON);
}

#[test]
fn daily_sla_breaches_unresolved_before_deadline_is_clean() {
    let now = parse_utc("2024-01-01T03:00:00Z").unwrap();
    let tickets = vec![ticket(TicketFixture {
        id: "t-1",
        status: Status::New,
        created_at: "2024-01-01T00:00:00Z",
        resolved_at: None,
        sla_deadline: Some("2024-01-01T04:00:00Z"),
    })];

    let days = daily_sla_breaches(&tickets, now);
    assert_eq!(days[0].breaches, 0);
}

#[test]
fn daily_sla_breaches_unparseable_resolution_never_breaches() {
    let now = parse_utc("2024-02-01T00:00:00Z").unwrap();
    let tickets = vec![ticket(TicketFixture {
        id: "t-1",
        status: Status::Resolved,
        created_at: "2024-01-01T00:00:00Z",
        resolved_at: Some("garbage"),
        sla_deadline: Some("2024-01-01T04:00:00Z"),
    })];

    let days = daily_sla_breaches(&tickets, now);
    assert_eq!(days[0].total, 1);
    assert_eq!(days[0].breaches, 0);
}

// Category heatmap
#[test]
fn category_counts_intensity_scales_to_max() {
    let mut hardware_1 = open_ticket("t-1", "2024-01-01T00:00:00Z");
    hardware_1.category_name = Some("Hardware".into());
    let mut hardware_2 = open_ticket("t-2", "2024-01-01T00:00:00Z");
    hardware_2.category_name = Some("Hardware".into());
    let mut network = open_ticket("t-3", "2024-01-01T00:00:00Z");
    network.category_name = Some("Network".into());
    let uncategorized = open_ticket("t-4", "2024-01-01T00:00:00Z");

    let counts = category_counts(&[hardware_1, hardware_2, network, uncategorized]);
    assert_eq!(counts.len(), 3);

    let hardware = counts.iter().find(|c| c.category == "Hardware").unwrap();
    assert_eq!(hardware.count, 2);
    assert!((hardware.intensity - 100.0).abs() < f64::EPSILON);

    let network = counts.iter().find(|c| c.category == "Network").unwrap();
    assert_eq!(network.count, 1);
    assert!((network.intensity - 50.0).abs() < f64::EPSILON);

    assert!(counts.iter().any(|c| c.category == "Uncategorized"));
}

#[test]
fn category_counts_empty_snapshot() {
    assert!(category_counts(&[]).is_empty());
}

// Agent workload
#[test]
fn agent_workloads_split_by_status() {
    let mut assigned_new = open_ticket("t-1", "2024-01-01T00:00:00Z");
    assigned_new.assigned_to = Some("u-2".into());
    assigned_new.assignee_name = Some("Ravi".into());

    let mut assigned_closed = ticket(TicketFixture {
        id: "t-2",
        status: Status::Closed,
        created_at: "2024-01-01T00:00:00Z",
        resolved_at: Some("2024-01-02T00:00:00Z"),
        sla_deadline: None,
    });
    assigned_closed.assigned_to = Some("u-2".into());
    assigned_closed.assignee_name = Some("Ravi".into());

    let unassigned = open_ticket("t-3", "2024-01-01T00:00:00Z");

    let workloads = agent_workloads(&[assigned_new, assigned_closed, unassigned]);

    // u-1 created everything, u-2 is assigned two tickets
    assert_eq!(workloads.len(), 2);

    let creator = workloads.iter().find(|w| w.agent_id == "u-1").unwrap();
    assert_eq!(creator.total, 0);

    let assignee = workloads.iter().find(|w| w.agent_id == "u-2").unwrap();
    assert_eq!(assignee.agent_name, "Ravi");
    assert_eq!(assignee.total, 2);
    assert_eq!(assignee.new, 1);
    assert_eq!(assignee.closed, 1);
    assert_eq!(assignee.in_progress, 0);
    assert_eq!(assignee.resolved, 0);
}

// Status summary
#[test]
fn status_counts_omit_empty_statuses() {
    let tickets = vec![
        open_ticket("t-1", "2024-01-01T00:00:00Z"),
        open_ticket("t-2", "2024-01-02T00:00:00Z"),
        ticket(TicketFixture {
            id: "t-3",
            status: Status::Closed,
            created_at: "2024-01-03T00:00:00Z",
            resolved_at: Some("2024-01-04T00:00:00Z"),
            sla_deadline: None,
        }),
    ];

    let counts = status_counts(&tickets);
    assert_eq!(
        counts,
        vec![
            StatusCount {
                status: Status::New,
                count: 2,
            },
            StatusCount {
                status: Status::Closed,
                count: 1,
            },
        ]
    );
}

#[test]
fn status_counts_since_honors_cutoff() {
    let tickets = vec![
        open_ticket("t-old", "2024-01-01T00:00:00Z"),
        open_ticket("t-new", "2024-01-09T00:00:00Z"),
        open_ticket("t-bad", "garbage"),
    ];
    let cutoff = parse_utc("2024-01-05T00:00:00Z").unwrap();

    let counts = status_counts_since(&tickets, cutoff);
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].count, 1);
}
