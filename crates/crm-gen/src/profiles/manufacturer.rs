//! Industrial manufacturer or distributor with procurement-driven cycles.

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
        slug: "manufacturer".to_string(),
        name: "Manufacturer".to_string(),
        description:
            "Industrial manufacturers and distributors with procurement-driven sales cycles."
                .to_string(),
        sales_reps: strings(&[
            "Tom Bradley",
            "Susan Park",
            "Robert Nguyen",
            "Lisa Martinez",
            "Brian Cooper",
            "Angela Wright",
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
            "Precision", "Allied", "National", "Superior", "Global", "Advanced", "Premier",
            "Continental", "Pacific", "Delta", "Atlas", "Sterling", "Apex", "Summit", "Pioneer",
            "Liberty", "Eagle", "Titan", "Patriot", "Crown",
        ]),
        name_suffixes: strings(&[
            " Manufacturing",
            " Industries",
            " Components",
            " Fabrication",
            " Metals",
            " Engineering",
            " Products",
            " Systems",
            " Solutions",
            " Supply Co.",
            " Materials",
            " Tools",
            " Works",
            " Corp",
            " Technologies",
        ]),
        legal_suffixes: strings(&[" Inc", " LLC", " Ltd", " and Sons", " Group", " PLC"]),
        industries: strings(&[
            "Automotive Parts",
            "Aerospace Components",
            "Industrial Machinery",
            "Metal Fabrication",
            "Plastics & Polymers",
            "Electronics Manufacturing",
            "Food & Beverage Processing",
            "Chemical Manufacturing",
            "Packaging & Containers",
            "Textile & Apparel",
            "Medical Devices",
            "Construction Materials",
        ]),
        employee_tiers: vec![
            tier(25, 75, 20),
            tier(76, 150, 25),
            tier(151, 300, 25),
            tier(301, 750, 15),
            tier(751, 2000, 10),
            tier(2001, 5000, 5),
        ],
        revenue: RevenueModel {
            per_employee: Band::new(40_000, 120_000),
            noise_sigma: 0.15,
            floor: 100_000,
            ceiling: 50_000_000,
        },
        website_tlds: strings(&[".com", ".net", ".us", ".co"]),
        description_templates: strings(&[
            "Leading {industry} manufacturer serving customers worldwide.",
            "Precision {industry} solutions for demanding applications.",
            "Trusted supplier of high-quality {industry} products since establishment.",
            "Full-service {industry} provider with vertically integrated operations.",
            "ISO-certified {industry} specialist with rapid turnaround capabilities.",
        ]),
        founded_years: Band::new(1965, 2020),
    }
}

fn contacts() -> ContactTables {
    ContactTables {
        per_account: Weighted::new(vec![(2, 35), (3, 35), (4, 20), (5, 10)]),
        departments: Weighted::new(vec![
            department(
                "Sales",
                &[
                    "Regional Sales Manager",
                    "Account Manager",
                    "VP of Sales",
                    "Business Development Manager",
                    "Sales Engineer",
                    "Director of Sales",
                ],
                20,
            ),
            department(
                "Engineering",
                &[
                    "Manufacturing Engineer",
                    "Quality Engineer",
                    "Design Engineer",
                    "VP of Engineering",
                    "Process Engineer",
                    "Chief Engineer",
                ],
                20,
            ),
            department(
                "Operations",
                &[
                    "Plant Manager",
                    "Operations Director",
                    "COO",
                    "Production Manager",
                    "Supply Chain Manager",
                    "Logistics Coordinator",
                ],
                20,
            ),
            department(
                "Procurement",
                &[
                    "Purchasing Manager",
                    "Procurement Director",
                    "Buyer",
                    "VP of Procurement",
                    "Supply Chain Director",
                ],
                15,
            ),
            department(
                "Quality",
                &[
                    "Quality Manager",
                    "QA Director",
                    "Quality Control Inspector",
                    "VP of Quality",
                ],
                10,
            ),
            department(
                "Executive",
                &["CEO", "President", "Owner", "General Manager"],
                8,
            ),
            department(
                "Finance",
                &["CFO", "Controller", "Finance Director", "Accounting Manager"],
                7,
            ),
        ]),
    }
}

fn deals() -> DealTables {
    DealTables {
        segment_rule: SegmentRule {
            smb_below: 100,
            enterprise_above: 500,
        },
        acv: BTreeMap::from([
            (Segment::Smb, Band::new(5_000, 50_000)),
            (Segment::MidMarket, Band::new(50_000, 500_000)),
            (Segment::Enterprise, Band::new(500_000, 5_000_000)),
        ]),
        pipelines: vec![
            PipelineDef {
                kind: PipelineKind::Primary,
                name: "New Accounts".to_string(),
                open_stages: weighted_strings(&[
                    ("Lead", 10),
                    ("Qualification", 15),
                    ("Sample/Trial", 20),
                    ("RFQ Response", 25),
                    ("Quote", 20),
                    ("PO Review", 10),
                ]),
                open_probabilities: stage_odds(&[
                    ("Lead", 5),
                    ("Qualification", 10),
                    ("Sample/Trial", 25),
                    ("RFQ Response", 40),
                    ("Quote", 55),
                    ("PO Review", 75),
                ]),
                won_stage: "Closed Won".to_string(),
                lost_stage: "Closed Lost".to_string(),
                outcomes: OutcomeWeights {
                    won: 18,
                    lost: 60,
                    open: 22,
                },
                cycle_days: cycle_by_segment((45, 90), (90, 180), (180, 365)),
            },
            PipelineDef {
                kind: PipelineKind::Renewal,
                name: "Reorders".to_string(),
                open_stages: weighted_strings(&[
                    ("Reorder Request", 30),
                    ("Quote", 40),
                    ("PO Received", 30),
                ]),
                open_probabilities: stage_odds(&[
                    ("Reorder Request", 75),
                    ("Quote", 85),
                    ("PO Received", 95),
                ]),
                won_stage: "Closed Won".to_string(),
                lost_stage: "Closed Lost".to_string(),
                outcomes: OutcomeWeights {
                    won: 90,
                    lost: 5,
                    open: 5,
                },
                cycle_days: CycleDays::Uniform(Band::new(10, 30)),
            },
            PipelineDef {
                kind: PipelineKind::Expansion,
                name: "Custom/Engineered Solutions".to_string(),
                open_stages: weighted_strings(&[
                    ("Requirements Gathering", 15),
                    ("Engineering Review", 25),
                    ("Prototype", 25),
                    ("Quote", 20),
                    ("Negotiation", 15),
                ]),
                open_probabilities: stage_odds(&[
                    ("Requirements Gathering", 10),
                    ("Engineering Review", 25),
                    ("Prototype", 40),
                    ("Quote", 55),
                    ("Negotiation", 70),
                ]),
                won_stage: "Closed Won".to_string(),
                lost_stage: "Closed Lost".to_string(),
                outcomes: OutcomeWeights {
                    won: 30,
                    lost: 45,
                    open: 25,
                },
                cycle_days: CycleDays::Uniform(Band::new(90, 270)),
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
            ("Price Too High", 25),
            ("Chose Competitor", 20),
            ("Spec Non-Compliance", 15),
            ("Lead Time Too Long", 15),
            ("No Decision / Budget Freeze", 10),
            ("Failed Quality Audit", 10),
            ("Minimum Order Qty Issue", 5),
        ]),
        enterprise_loss_reasons: Some(weighted_strings(&[
            ("Price Too High", 15),
            ("Chose Competitor", 15),
            ("Spec Non-Compliance", 20),
            ("Lead Time Too Long", 10),
            ("No Decision / Budget Freeze", 15),
            ("Failed Quality Audit", 15),
            ("Minimum Order Qty Issue", 10),
        ])),
        name_template: "PO-{yymm}-{company}".to_string(),
        engagement_types: Vec::new(),
        subscription_terms: None,
        self_serve: None,
    }
}

fn activities() -> ActivityTables {
    use ActivityType::{Call, Meeting};

    ActivityTables {
        phase_mix: PhaseTable {
            early: channel_mix(25, 25, 10, 30, 10),
            mid: channel_mix(25, 20, 35, 10, 10),
            late: channel_mix(40, 25, 20, 5, 10),
        },
        count_won: Band::new(8, 16),
        count_lost: Band::new(3, 7),
        segment_multiplier: BTreeMap::from([
            (Segment::Smb, 0.7),
            (Segment::MidMarket, 1.0),
            (Segment::Enterprise, 1.5),
        ]),
        open_weekly_cap: 15,
        open_minimum: 2,
        recent_activity_days: 14,
        subjects: channel_subjects(
            &[
                "RFQ response follow-up",
                "Updated pricing sheet",
                "Sample shipment tracking",
                "Quality cert attached",
                "Lead time confirmation",
                "PO acknowledgment",
            ],
            &[
                "Initial inquiry call",
                "Spec clarification",
                "Quote review call",
                "Production status update",
                "Reorder discussion",
                "Complaint resolution",
            ],
            &[
                "Plant tour",
                "Technical review meeting",
                "Contract negotiation",
                "Annual business review",
                "Quality audit",
                "Engineering design review",
            ],
            &[
                "Connection request",
                "Industry article share",
                "Trade show follow-up",
                "InMail introduction",
                "Company update engagement",
            ],
            &[
                "Met at trade show",
                "Referral from distributor",
                "Internal capacity note",
                "Competitor pricing intel",
                "Seasonal demand note",
            ],
        ),
        phase_subjects: PhaseTable {
            early: channel_subjects(
                &["RFQ response follow-up", "Quality cert attached"],
                &["Initial inquiry call", "Spec clarification"],
                &["Plant tour", "Technical review meeting"],
                &[
                    "Connection request",
                    "InMail introduction",
                    "Trade show follow-up",
                ],
                &["Met at trade show", "Referral from distributor"],
            ),
            mid: channel_subjects(
                &["Sample shipment tracking", "Updated pricing sheet"],
                &["Quote review call", "Production status update"],
                &["Engineering design review", "Technical review meeting"],
                &["Industry article share", "Company update engagement"],
                &["Competitor pricing intel", "Internal capacity note"],
            ),
            late: channel_subjects(
                &[
                    "PO acknowledgment",
                    "Lead time confirmation",
                    "Updated pricing sheet",
                ],
                &["Reorder discussion", "Complaint resolution"],
                &[
                    "Contract negotiation",
                    "Annual business review",
                    "Quality audit",
                ],
                &["Company update engagement"],
                &["Seasonal demand note", "Internal capacity note"],
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
