//! Consulting and professional services firm selling engagements and retainers.

use std::collections::BTreeMap;

use crm_records::{ActivityType, PipelineKind, Segment};

use super::{
    AccountTables, ActivityTables, Band, ContactTables, CycleDays, DealTables, OutcomeWeights,
    PhaseTable, PipelineDef, Profile, RevenueModel, SegmentRule, SpawnRule, Weighted, channel_mix,
    channel_subjects, cycle_by_segment, department, stage_odds, standard_account_touches, standard_body_templates, strings, tier,
    weighted_strings,
};

pub fn profile() -> Profile {
    Profile {
        slug: "consultancy".to_string(),
        name: "Consultancy".to_string(),
        description:
            "Consulting and professional services firms with engagement-based sales cycles."
                .to_string(),
        sales_reps: strings(&[
            "Catherine Brooks",
            "Daniel Reeves",
            "Patricia Morales",
            "Andrew Fleming",
            "Jessica Thornton",
            "Michael Lancaster",
        ]),
        accounts: accounts(),
        contacts: contacts(),
        deals: deals(),
        activities: activities(),
    }
}

fn accounts() -> AccountTables {
    AccountTables {
        name_prefixes: strings(&[
            "Meridian", "Elevate", "Catalyst", "Pinnacle", "Sterling", "Keystone", "Vantage",
            "Summit", "Nexus", "Beacon", "Clarity", "Stratton", "Archer", "Crestview", "Whitfield",
        ]),
        name_suffixes: strings(&[
            " Consulting Group",
            " Advisory",
            " Partners",
            " & Associates",
            " Solutions",
            " Strategy Group",
            " Consulting",
            " Group",
        ]),
        legal_suffixes: strings(&[" Inc", " LLC", " Ltd", " and Sons", " Group", " PLC"]),
        industries: strings(&[
            "Management Consulting",
            "IT Consulting",
            "Financial Advisory",
            "Human Capital Consulting",
            "Strategy Consulting",
            "Operations Consulting",
            "Risk & Compliance",
            "Digital Transformation",
            "Healthcare Consulting",
            "Environmental Consulting",
            "Legal Consulting",
            "Marketing & Brand Strategy",
        ]),
        employee_tiers: vec![
            tier(10, 30, 25),
            tier(31, 75, 25),
            tier(76, 200, 20),
            tier(201, 500, 15),
            tier(501, 1500, 10),
            tier(1501, 5000, 5),
        ],
        revenue: RevenueModel {
            per_employee: Band::new(80_000, 250_000),
            noise_sigma: 0.15,
            floor: 100_000,
            ceiling: 50_000_000,
        },
        website_tlds: strings(&[".com", ".co", ".consulting", ".net"]),
        description_templates: strings(&[
            "Trusted {industry} partner helping organizations drive growth.",
            "Boutique {industry} firm delivering measurable business outcomes.",
            "Leading {industry} practice serving Fortune 500 and mid-market clients.",
            "Expert {industry} advisors with deep domain expertise.",
            "Results-driven {industry} consultancy focused on sustainable impact.",
        ]),
        founded_years: Band::new(1990, 2023),
    }
}

fn contacts() -> ContactTables {
    ContactTables {
        per_account: Weighted::new(vec![(2, 35), (3, 35), (4, 20), (5, 10)]),
        departments: Weighted::new(vec![
            department(
                "Sales",
                &[
                    "Business Development Director",
                    "Client Partner",
                    "VP of Business Development",
                    "Engagement Manager",
                    "Sales Director",
                ],
                20,
            ),
            department(
                "Consulting",
                &[
                    "Senior Consultant",
                    "Principal Consultant",
                    "Managing Consultant",
                    "Associate Consultant",
                    "Director of Consulting",
                ],
                25,
            ),
            department(
                "Operations",
                &[
                    "COO",
                    "Director of Operations",
                    "Practice Manager",
                    "Resource Manager",
                    "VP of Operations",
                ],
                15,
            ),
            department(
                "Executive",
                &[
                    "Managing Partner",
                    "Senior Partner",
                    "CEO",
                    "Founder",
                    "President",
                ],
                15,
            ),
            department(
                "Finance",
                &["CFO", "Finance Director", "Controller", "Billing Manager"],
                8,
            ),
            department(
                "Marketing",
                &[
                    "Marketing Director",
                    "VP of Marketing",
                    "Content Strategist",
                    "Thought Leadership Manager",
                ],
                10,
            ),
            department(
                "Human Resources",
                &[
                    "HR Director",
                    "Talent Acquisition Lead",
                    "VP of People",
                    "Recruiting Manager",
                ],
                7,
            ),
        ]),
    }
}

fn deals() -> DealTables {
    DealTables {
        segment_rule: SegmentRule {
            smb_below: 200,
            enterprise_above: 1000,
        },
        acv: BTreeMap::from([
            (Segment::Smb, Band::new(25_000, 100_000)),
            (Segment::MidMarket, Band::new(100_000, 500_000)),
            (Segment::Enterprise, Band::new(500_000, 2_000_000)),
        ]),
        pipelines: vec![
            PipelineDef {
                kind: PipelineKind::Primary,
                name: "New Engagements".to_string(),
                open_stages: weighted_strings(&[
                    ("Opportunity Qualified", 10),
                    ("Discovery", 25),
                    ("Proposal", 30),
                    ("Negotiation", 20),
                    ("Verbal", 15),
                ]),
                open_probabilities: stage_odds(&[
                    ("Opportunity Qualified", 10),
                    ("Discovery", 20),
                    ("Proposal", 40),
                    ("Negotiation", 60),
                    ("Verbal", 80),
                ]),
                won_stage: "Closed Won".to_string(),
                lost_stage: "Closed Lost".to_string(),
                outcomes: OutcomeWeights {
                    won: 25,
                    lost: 55,
                    open: 20,
                },
                cycle_days: cycle_by_segment((30, 60), (60, 120), (120, 240)),
            },
            PipelineDef {
                kind: PipelineKind::Renewal,
                name: "Retainer Renewals".to_string(),
                open_stages: weighted_strings(&[
                    ("Renewal Discussion", 20),
                    ("Scope Review", 30),
                    ("Terms", 30),
                    ("Verbal", 20),
                ]),
                open_probabilities: stage_odds(&[
                    ("Renewal Discussion", 70),
                    ("Scope Review", 75),
                    ("Terms", 85),
                    ("Verbal", 90),
                ]),
                won_stage: "Closed Won".to_string(),
                lost_stage: "Closed Lost".to_string(),
                outcomes: OutcomeWeights {
                    won: 80,
                    lost: 12,
                    open: 8,
                },
                cycle_days: CycleDays::Uniform(Band::new(15, 45)),
            },
            PipelineDef {
                kind: PipelineKind::Expansion,
                name: "Follow-On Projects".to_string(),
                open_stages: weighted_strings(&[
                    ("Opportunity Identified", 15),
                    ("Scoping", 30),
                    ("Proposal", 30),
                    ("Verbal", 25),
                ]),
                open_probabilities: stage_odds(&[
                    ("Opportunity Identified", 15),
                    ("Scoping", 30),
                    ("Proposal", 50),
                    ("Verbal", 75),
                ]),
                won_stage: "Closed Won".to_string(),
                lost_stage: "Closed Lost".to_string(),
                outcomes: OutcomeWeights {
                    won: 60,
                    lost: 20,
                    open: 20,
                },
                cycle_days: CycleDays::Uniform(Band::new(20, 60)),
            },
        ],
        primary_deal_probability: 0.70,
        primary_deals_per_account: Weighted::new(vec![(1, 50), (2, 35), (3, 15)]),
        renewal: Some(SpawnRule {
            probability: 1.0,
            offset_days: Band::new(350, 380),
            amount_factor: Band::new(0.95, 1.05),
        }),
        expansion: Some(SpawnRule {
            probability: 0.50,
            offset_days: Band::new(90, 270),
            amount_factor: Band::new(0.20, 0.50),
        }),
        loss_reasons: weighted_strings(&[
            ("Budget Constraints", 20),
            ("Chose Competitor", 20),
            ("Project Deprioritized", 15),
            ("Internal Resources Preferred", 15),
            ("Scope Mismatch", 10),
            ("Timing / Budget Cycle", 10),
            ("Key Stakeholder Left", 10),
        ]),
        enterprise_loss_reasons: Some(weighted_strings(&[
            ("Budget Constraints", 15),
            ("Chose Competitor", 25),
            ("Project Deprioritized", 15),
            ("Internal Resources Preferred", 10),
            ("Scope Mismatch", 15),
            ("Timing / Budget Cycle", 10),
            ("Key Stakeholder Left", 10),
        ])),
        name_template: "{company} - {engagement}".to_string(),
        engagement_types: strings(&[
            "Digital Transformation",
            "Process Optimization",
            "Strategic Planning",
            "Org Restructuring",
            "System Implementation",
            "Market Entry Strategy",
            "Operational Assessment",
            "Change Management",
            "Cost Reduction Initiative",
            "Growth Strategy",
            "M&A Due Diligence",
            "Technology Roadmap",
        ]),
        subscription_terms: None,
        self_serve: None,
    }
}

fn activities() -> ActivityTables {
    use ActivityType::{Call, Meeting};

    ActivityTables {
        phase_mix: PhaseTable {
            early: channel_mix(20, 15, 15, 40, 10),
            mid: channel_mix(25, 15, 40, 10, 10),
            late: channel_mix(40, 15, 25, 5, 15),
        },
        count_won: Band::new(10, 18),
        count_lost: Band::new(4, 8),
        segment_multiplier: BTreeMap::from([
            (Segment::Smb, 0.8),
            (Segment::MidMarket, 1.0),
            (Segment::Enterprise, 1.3),
        ]),
        open_weekly_cap: 15,
        open_minimum: 2,
        recent_activity_days: 14,
        subjects: channel_subjects(
            &[
                "Proposal follow-up",
                "Engagement scope outline",
                "Case study - similar project",
                "Statement of work draft",
                "Rate card and availability",
                "Thought leadership piece",
            ],
            &[
                "Needs assessment call",
                "Stakeholder alignment call",
                "Scope clarification",
                "Partner introduction",
                "Project status check-in",
                "Retainer renewal discussion",
            ],
            &[
                "Discovery workshop",
                "Proposal presentation",
                "Executive sponsor meeting",
                "Project kick-off",
                "Quarterly business review",
                "Strategy alignment session",
            ],
            &[
                "Connection request",
                "Thought leadership share",
                "InMail introduction",
                "Conference follow-up",
                "Article engagement",
            ],
            &[
                "Met at industry conference",
                "Referral from partner firm",
                "Internal team briefing",
                "Competitive intelligence",
                "Budget cycle timing note",
            ],
        ),
        phase_subjects: PhaseTable {
            early: channel_subjects(
                &[
                    "Engagement scope outline",
                    "Case study - similar project",
                    "Thought leadership piece",
                ],
                &["Needs assessment call", "Partner introduction"],
                &["Discovery workshop", "Strategy alignment session"],
                &[
                    "Connection request",
                    "InMail introduction",
                    "Conference follow-up",
                ],
                &["Met at industry conference", "Referral from partner firm"],
            ),
            mid: channel_subjects(
                &["Case study - similar project", "Rate card and availability"],
                &["Stakeholder alignment call", "Scope clarification"],
                &["Proposal presentation", "Executive sponsor meeting"],
                &["Thought leadership share", "Article engagement"],
                &["Competitive intelligence", "Internal team briefing"],
            ),
            late: channel_subjects(
                &[
                    "Proposal follow-up",
                    "Statement of work draft",
                    "Rate card and availability",
                ],
                &["Project status check-in", "Retainer renewal discussion"],
                &["Executive sponsor meeting", "Quarterly business review"],
                &["Article engagement"],
                &["Budget cycle timing note", "Internal team briefing"],
            ),
        },
        phase_subject_bias: 0.70,
        body_templates: standard_body_templates(),
        durations: BTreeMap::from([(Call, Band::new(15, 45)), (Meeting, Band::new(45, 120))]),
        stakeholder_rate: 0.30,
        zero_activity_fraction: 0.10,
        account_touches: standard_account_touches(),
    }
}
