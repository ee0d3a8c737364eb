//! Software-as-a-Service vendor with sales-led and product-led motions.

use std::collections::BTreeMap;

use crm_records::{ActivityType, PipelineKind, Segment, SubscriptionType};

use super::{
    AccountTables, ActivityTables, Band, ContactTables, CycleDays, DealTables, OutcomeWeights,
    PhaseTable, PipelineDef, Profile, RevenueModel, SegmentRule, SelfServeConfig, SpawnRule,
    Weighted, channel_mix, channel_subjects, cycle_by_segment, department, standard_account_touches, standard_body_templates,
    stage_odds, strings, tier, weighted_strings,
};

pub fn profile() -> Profile {
    Profile {
        slug: "b2b-saas".to_string(),
        name: "B2B SaaS".to_string(),
        description: "Software-as-a-Service companies with subscription-based sales cycles."
            .to_string(),
        sales_reps: strings(&[
            "Sarah Chen",
            "Marcus Johnson",
            "Emily Rodriguez",
            "David Kim",
            "Rachel Thompson",
            "James O'Brien",
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
            "Cloud", "Data", "Cyber", "Tech", "Net", "Digi", "Info", "Smart", "Sync", "Flow",
            "Stack", "Grid", "Node", "Pixel", "Byte", "Core", "Meta", "Hyper", "Ultra", "Prime",
            "Alpha", "Beta", "Quantum", "Vector", "Logic", "Signal", "Pulse", "Wave",
        ]),
        name_suffixes: strings(&[
            "Labs", "Systems", "Solutions", "Tech", "Software", "IO", "AI", "Analytics", "Cloud",
            "Networks", "Dynamics", "Ware", "Works", "Hub", "Base", "Stack", "Logic", "Mind",
            "Sense", "Force", "Bridge", "Link", "Path", "Scale", "Shift", "Stream", "Vault",
        ]),
        legal_suffixes: strings(&[" Inc", " LLC", " Ltd", " and Sons", " Group", " PLC"]),
        industries: strings(&[
            "Enterprise Software",
            "Cloud Infrastructure",
            "Cybersecurity",
            "Data Analytics",
            "Artificial Intelligence",
            "Developer Tools",
            "Marketing Technology",
            "Sales Enablement",
            "Human Resources Tech",
            "Financial Technology",
            "Healthcare Technology",
            "Supply Chain Software",
            "Customer Success",
            "Business Intelligence",
            "E-commerce Platform",
            "Communication & Collaboration",
            "Project Management",
            "Identity & Access Management",
            "DevOps & CI/CD",
            "API & Integration Platform",
        ]),
        employee_tiers: vec![
            tier(50, 100, 30),
            tier(101, 250, 25),
            tier(251, 500, 20),
            tier(501, 1000, 15),
            tier(1001, 2500, 7),
            tier(2501, 5000, 3),
        ],
        revenue: RevenueModel {
            per_employee: Band::new(50_000, 200_000),
            noise_sigma: 0.15,
            floor: 100_000,
            ceiling: 50_000_000,
        },
        website_tlds: strings(&[".com", ".io", ".co", ".ai", ".tech"]),
        description_templates: strings(&[
            "Leading provider of {industry} solutions for modern enterprises.",
            "Innovative {industry} platform helping businesses scale.",
            "Next-generation {industry} tools for growing teams.",
            "Enterprise-grade {industry} solutions with a focus on simplicity.",
            "Transforming how businesses approach {industry}.",
        ]),
        founded_years: Band::new(2010, 2024),
    }
}

fn contacts() -> ContactTables {
    ContactTables {
        per_account: Weighted::new(vec![(2, 35), (3, 35), (4, 20), (5, 10)]),
        departments: Weighted::new(vec![
            department(
                "Sales",
                &[
                    "Account Executive",
                    "Sales Manager",
                    "VP of Sales",
                    "Sales Development Representative",
                    "Director of Sales",
                    "Chief Revenue Officer",
                    "Regional Sales Manager",
                ],
                25,
            ),
            department(
                "Marketing",
                &[
                    "Marketing Manager",
                    "VP of Marketing",
                    "CMO",
                    "Content Marketing Manager",
                    "Demand Generation Manager",
                    "Director of Marketing",
                ],
                15,
            ),
            department(
                "Customer Success",
                &[
                    "Customer Success Manager",
                    "VP of Customer Success",
                    "Director of Customer Success",
                    "Customer Success Associate",
                    "Head of Customer Success",
                ],
                15,
            ),
            department(
                "Engineering",
                &[
                    "Software Engineer",
                    "Engineering Manager",
                    "VP of Engineering",
                    "CTO",
                    "Senior Software Engineer",
                    "Principal Engineer",
                ],
                10,
            ),
            department(
                "Product",
                &[
                    "Product Manager",
                    "VP of Product",
                    "Chief Product Officer",
                    "Senior Product Manager",
                    "Director of Product",
                ],
                10,
            ),
            department(
                "Operations",
                &[
                    "Operations Manager",
                    "COO",
                    "Director of Operations",
                    "Business Operations Analyst",
                    "VP of Operations",
                ],
                10,
            ),
            department(
                "Executive",
                &["CEO", "President", "Co-Founder", "Managing Director"],
                8,
            ),
            department(
                "Finance",
                &[
                    "CFO",
                    "Finance Manager",
                    "Controller",
                    "Director of Finance",
                    "Financial Analyst",
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
            (Segment::Smb, Band::new(8_000, 25_000)),
            (Segment::MidMarket, Band::new(25_000, 100_000)),
            (Segment::Enterprise, Band::new(100_000, 350_000)),
            (Segment::SelfServe, Band::new(600, 5_000)),
        ]),
        pipelines: vec![
            PipelineDef {
                kind: PipelineKind::Primary,
                name: "New Business".to_string(),
                open_stages: weighted_strings(&[
                    ("Lead", 10),
                    ("Qualified", 15),
                    ("Discovery", 25),
                    ("Demo/Evaluation", 25),
                    ("Proposal", 15),
                    ("Negotiation", 10),
                ]),
                open_probabilities: stage_odds(&[
                    ("Lead", 5),
                    ("Qualified", 10),
                    ("Discovery", 20),
                    ("Demo/Evaluation", 35),
                    ("Proposal", 50),
                    ("Negotiation", 70),
                ]),
                won_stage: "Closed Won".to_string(),
                lost_stage: "Closed Lost".to_string(),
                outcomes: OutcomeWeights {
                    won: 22,
                    lost: 58,
                    open: 20,
                },
                cycle_days: cycle_by_segment((30, 45), (60, 90), (90, 180)),
            },
            PipelineDef {
                kind: PipelineKind::Renewal,
                name: "Renewal".to_string(),
                open_stages: weighted_strings(&[
                    ("Upcoming Renewal", 20),
                    ("Customer Review", 30),
                    ("Renewal Proposal", 30),
                    ("Negotiation", 20),
                ]),
                open_probabilities: stage_odds(&[
                    ("Upcoming Renewal", 70),
                    ("Customer Review", 80),
                    ("Renewal Proposal", 85),
                    ("Negotiation", 90),
                ]),
                won_stage: "Closed Won".to_string(),
                lost_stage: "Closed Lost".to_string(),
                outcomes: OutcomeWeights {
                    won: 85,
                    lost: 10,
                    open: 5,
                },
                cycle_days: CycleDays::Uniform(Band::new(15, 30)),
            },
            PipelineDef {
                kind: PipelineKind::Expansion,
                name: "Expansion".to_string(),
                open_stages: weighted_strings(&[
                    ("Expansion Identified", 15),
                    ("Needs Analysis", 30),
                    ("Proposal", 30),
                    ("Negotiation", 25),
                ]),
                open_probabilities: stage_odds(&[
                    ("Expansion Identified", 15),
                    ("Needs Analysis", 30),
                    ("Proposal", 50),
                    ("Negotiation", 65),
                ]),
                won_stage: "Closed Won".to_string(),
                lost_stage: "Closed Lost".to_string(),
                outcomes: OutcomeWeights {
                    won: 45,
                    lost: 30,
                    open: 25,
                },
                cycle_days: CycleDays::Uniform(Band::new(30, 60)),
            },
            PipelineDef {
                kind: PipelineKind::SelfServe,
                name: "Self-Serve".to_string(),
                open_stages: weighted_strings(&[("Signed Up", 30), ("Activated", 30), ("Trial", 40)]),
                open_probabilities: stage_odds(&[
                    ("Signed Up", 10),
                    ("Activated", 25),
                    ("Trial", 40),
                ]),
                won_stage: "Converted".to_string(),
                lost_stage: "Churned".to_string(),
                outcomes: OutcomeWeights {
                    won: 15,
                    lost: 70,
                    open: 15,
                },
                cycle_days: CycleDays::Uniform(Band::new(7, 30)),
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
            ("Went with Competitor", 25),
            ("No Decision Made", 20),
            ("Bad Timing", 10),
            ("Champion Left Company", 5),
            ("Failed Security Review", 5),
            ("Lost to Open Source", 10),
            ("Chose to Build In-House", 5),
        ]),
        enterprise_loss_reasons: Some(weighted_strings(&[
            ("Budget Constraints", 25),
            ("Went with Competitor", 15),
            ("No Decision Made", 15),
            ("Bad Timing", 5),
            ("Champion Left Company", 5),
            ("Failed Security Review", 20),
            ("Lost to Open Source", 5),
            ("Chose to Build In-House", 10),
        ])),
        name_template: "{company} {yymm}".to_string(),
        engagement_types: Vec::new(),
        subscription_terms: Some(Weighted::new(vec![
            (SubscriptionType::Annual, 70),
            (SubscriptionType::Monthly, 30),
        ])),
        self_serve: Some(SelfServeConfig {
            fraction_of_accounts: 0.20,
            plg_to_sales_probability: 0.10,
            promotion_offset_days: Band::new(14, 90),
            subscription_split: Weighted::new(vec![
                (SubscriptionType::Monthly, 60),
                (SubscriptionType::Annual, 40),
            ]),
            monthly_amount: Band::new(50, 500),
            annual_amount: Band::new(500, 5_000),
            zero_touch: true,
        }),
    }
}

fn activities() -> ActivityTables {
    use ActivityType::{Call, Meeting};

    ActivityTables {
        phase_mix: PhaseTable {
            early: channel_mix(20, 20, 10, 40, 10),
            mid: channel_mix(25, 20, 35, 10, 10),
            late: channel_mix(45, 20, 20, 5, 10),
        },
        count_won: Band::new(10, 20),
        count_lost: Band::new(4, 8),
        segment_multiplier: BTreeMap::from([
            (Segment::Smb, 0.8),
            (Segment::MidMarket, 1.0),
            (Segment::Enterprise, 1.4),
        ]),
        open_weekly_cap: 15,
        open_minimum: 2,
        recent_activity_days: 14,
        subjects: channel_subjects(
            &[
                "Follow-up on pricing proposal",
                "Introduction to platform",
                "Sending case study",
                "Contract review",
                "ROI analysis attached",
                "Nurture - industry report",
            ],
            &[
                "Discovery call",
                "Quarterly business review",
                "Cold outreach",
                "Champion check-in",
                "Negotiation follow-up",
                "Renewal discussion",
            ],
            &[
                "On-site demo",
                "Executive alignment",
                "Technical deep dive",
                "Kick-off call",
                "QBR",
                "Security review walkthrough",
            ],
            &[
                "Connection request",
                "InMail outreach",
                "Commented on post",
                "Shared company content",
                "Intro message via mutual connection",
            ],
            &[
                "Met at SaaStr conference",
                "Referred by existing customer",
                "Internal handoff notes",
                "Competitor intel",
                "Budget cycle starts Q1",
            ],
        ),
        phase_subjects: PhaseTable {
            early: channel_subjects(
                &[
                    "Introduction to platform",
                    "Sending case study",
                    "Nurture - industry report",
                ],
                &["Discovery call", "Cold outreach"],
                &["Kick-off call", "Technical deep dive"],
                &[
                    "Connection request",
                    "InMail outreach",
                    "Intro message via mutual connection",
                ],
                &["Met at SaaStr conference", "Referred by existing customer"],
            ),
            mid: channel_subjects(
                &["Sending case study", "ROI analysis attached"],
                &["Champion check-in", "Quarterly business review"],
                &["On-site demo", "Technical deep dive", "Executive alignment"],
                &["Commented on post", "Shared company content"],
                &["Competitor intel", "Internal handoff notes"],
            ),
            late: channel_subjects(
                &[
                    "Follow-up on pricing proposal",
                    "Contract review",
                    "ROI analysis attached",
                ],
                &["Negotiation follow-up", "Renewal discussion"],
                &["Executive alignment", "QBR", "Security review walkthrough"],
                &["Shared company content"],
                &["Budget cycle starts Q1", "Internal handoff notes"],
            ),
        },
        phase_subject_bias: 0.70,
        body_templates: standard_body_templates(),
        durations: BTreeMap::from([(Call, Band::new(10, 45)), (Meeting, Band::new(30, 90))]),
        stakeholder_rate: 0.30,
        zero_activity_fraction: 0.10,
        account_touches: standard_account_touches(),
    }
}
