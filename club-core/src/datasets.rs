use club_types::{FinanceEntry, InboxAttachment, InboxMessage, SquadPlayer, Trend};

fn player(
    id: &str,
    name: &str,
    position: &str,
    position_group: &str,
    age: u8,
    nationality: &str,
    current_ability: u8,
    potential_ability: u8,
    value: i64,
    wage: i64,
    contract_until: &str,
    morale: &str,
    condition: u8,
) -> SquadPlayer {
    SquadPlayer {
        id: id.to_string(),
        name: name.to_string(),
        position: position.to_string(),
        position_group: position_group.to_string(),
        age,
        nationality: nationality.to_string(),
        current_ability,
        potential_ability,
        value,
        wage,
        contract_until: contract_until.to_string(),
        morale: morale.to_string(),
        condition,
    }
}

/// The demo first-team squad. Eleven players across four position groups.
pub fn squad_players() -> Vec<SquadPlayer> {
    vec![
        player("p01", "Emiliano Martínez", "GK", "Goalkeeper", 32, "Argentina", 84, 85, 28_000_000, 120_000, "2029", "Very Happy", 95),
        player("p02", "Ezri Konsa", "DC", "Defender", 27, "England", 79, 82, 38_000_000, 85_000, "2028", "Happy", 92),
        player("p03", "Pau Torres", "DC", "Defender", 28, "Spain", 80, 81, 42_000_000, 110_000, "2028", "Happy", 90),
        player("p04", "Lucas Digne", "DL", "Defender", 31, "France", 76, 76, 15_000_000, 95_000, "2026", "Content", 88),
        player("p05", "Boubacar Kamara", "DM", "Midfielder", 25, "France", 81, 86, 55_000_000, 100_000, "2027", "Happy", 85),
        player("p06", "Youri Tielemans", "MC", "Midfielder", 28, "Belgium", 80, 81, 40_000_000, 125_000, "2027", "Very Happy", 93),
        player("p07", "John McGinn", "MC", "Midfielder", 30, "Scotland", 78, 78, 25_000_000, 90_000, "2027", "Very Happy", 96),
        player("p08", "Morgan Rogers", "AMC", "Midfielder", 22, "England", 77, 88, 48_000_000, 60_000, "2030", "Happy", 94),
        player("p09", "Leon Bailey", "AMR", "Forward", 27, "Jamaica", 78, 80, 35_000_000, 105_000, "2027", "Content", 89),
        player("p10", "Ollie Watkins", "ST", "Forward", 29, "England", 83, 84, 60_000_000, 130_000, "2028", "Very Happy", 91),
        player("p11", "Jhon Durán", "ST", "Forward", 21, "Colombia", 75, 89, 45_000_000, 70_000, "2030", "Unsettled", 97),
    ]
}

fn entry(category: &str, amount: i64, percentage: f64, trend: Trend) -> FinanceEntry {
    FinanceEntry {
        category: category.to_string(),
        amount,
        percentage,
        trend,
    }
}

/// Season-to-date income ledger.
pub fn income_entries() -> Vec<FinanceEntry> {
    vec![
        entry("Gate Receipts", 4_167_153, 8.5, Trend::Up),
        entry("Season Tickets", 10_574_100, 21.6, Trend::Up),
        entry("TV Revenue", 7_631_986, 15.6, Trend::Up),
        entry("Merchandising", 4_871_443, 10.0, Trend::Down),
        entry("Prize Money", 16_549_068, 33.9, Trend::Up),
        entry("Player Sales", 0, 0.0, Trend::Neutral),
        entry("Sponsorship", 3_200_000, 6.6, Trend::Up),
        entry("Other Income", 1_846_680, 3.8, Trend::Up),
    ]
}

/// Season-to-date expenditure ledger.
pub fn expenditure_entries() -> Vec<FinanceEntry> {
    vec![
        entry("Player Wages", 10_030_102, 40.6, Trend::Up),
        entry("Bonuses", 3_066_444, 12.4, Trend::Down),
        entry("Loyalty Bonuses", 1_643_260, 6.7, Trend::Up),
        entry("Staff Wages", 2_331_840, 9.4, Trend::Up),
        entry("Non Football Costs", 1_366_008, 5.5, Trend::Down),
        entry("Director Emoluments", 200_000, 0.8, Trend::Neutral),
        entry("Transfer Fees", 5_800_000, 23.5, Trend::Up),
        entry("Agent Fees", 297_738, 1.2, Trend::Down),
    ]
}

fn attachment(name: &str, size: &str, kind: &str) -> InboxAttachment {
    InboxAttachment {
        name: name.to_string(),
        size: size.to_string(),
        kind: kind.to_string(),
    }
}

fn mail(
    id: &str,
    from: &str,
    from_email: &str,
    subject: &str,
    preview: &str,
    content: &str,
    timestamp: &str,
    is_read: bool,
    is_starred: bool,
    attachments: Vec<InboxAttachment>,
) -> InboxMessage {
    InboxMessage {
        id: id.to_string(),
        from: from.to_string(),
        from_email: from_email.to_string(),
        avatar: "avatars/department.png".to_string(),
        subject: subject.to_string(),
        preview: preview.to_string(),
        content: content.to_string(),
        timestamp: timestamp.to_string(),
        is_read,
        is_starred,
        attachments,
    }
}

/// The demo inbox. Departmental mail with two unread messages.
pub fn inbox_messages() -> Vec<InboxMessage> {
    vec![
        mail(
            "m01",
            "Manager Analytics",
            "analytics@boardroomfc.com",
            "Transfer window review - January targets",
            "Latest scouting reports for the January transfer window. Key targets identified in midfield and defence.",
            "Our scouting team has compiled comprehensive reports on potential January signings. The analysis shows strong candidates for our midfield reinforcement needs.",
            "Jan 15",
            false,
            true,
            vec![
                attachment("transfer_targets.pdf", "2.1 MB", "pdf"),
                attachment("budget_analysis.xlsx", "891 KB", "excel"),
            ],
        ),
        mail(
            "m02",
            "Team Performance",
            "performance@boardroomfc.com",
            "Weekly training data - Player fitness metrics",
            "Fitness analysis from last week's training sessions. Notable improvements in stamina and speed.",
            "This week's training data shows significant improvements across the squad, particularly in cardiovascular fitness and sprint speeds.",
            "Jan 14",
            true,
            false,
            vec![attachment("fitness_report.pdf", "1.5 MB", "pdf")],
        ),
        mail(
            "m03",
            "Match Analysis",
            "analysis@boardroomfc.com",
            "Post-match report: vs Manchester City",
            "Tactical analysis of yesterday's match. Key areas for improvement in defensive transitions.",
            "Yesterday's match provided valuable insights into our tactical setup. Possession play improved but defensive transitions need attention.",
            "Jan 13",
            true,
            true,
            Vec::new(),
        ),
        mail(
            "m04",
            "Youth Academy",
            "academy@boardroomfc.com",
            "Promotion candidates - U21 to first team",
            "Three academy players showing exceptional development. Recommendation for first team integration.",
            "Our youth development program has produced three standout performers ready for first team consideration. Assessment reports attached.",
            "Jan 12",
            false,
            false,
            vec![
                attachment("academy_report.pdf", "3.2 MB", "pdf"),
                attachment("player_videos.zip", "125 MB", "zip"),
            ],
        ),
        mail(
            "m05",
            "Financial Controller",
            "finance@boardroomfc.com",
            "Q1 budget review - Transfer funds allocation",
            "Quarterly financial review complete. Transfer budget confirmed for the remaining season.",
            "The financial review shows a healthy position for January activities. Full budget breakdown and recommendations provided.",
            "Jan 11",
            true,
            false,
            vec![attachment("q1_budget.pdf", "1.8 MB", "pdf")],
        ),
    ]
}
