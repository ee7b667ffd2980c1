//! Achievement display

use super::report::format_header;
use crate::models::{Achievement, AchievementDefinition};

/// Full catalog with unlock state
pub fn format_achievements(status: &[(&AchievementDefinition, Option<Achievement>)]) -> String {
    let unlocked = status.iter().filter(|(_, a)| a.is_some()).count();
    let mut output = format_header(&format!("Achievements ({}/{})", unlocked, status.len()));

    for (def, achievement) in status {
        match achievement {
            Some(a) => output.push_str(&format!(
                "{} {:<20} {:<10} {}  (unlocked {})\n",
                def.icon,
                def.name,
                def.kind,
                def.description,
                a.unlocked_date.format("%Y-%m-%d")
            )),
            None => output.push_str(&format!(
                "   {:<20} {:<10} {}\n",
                def.name, def.kind, def.description
            )),
        }
    }

    output
}

/// One line per newly unlocked achievement
pub fn format_unlocked(achievements: &[Achievement]) -> String {
    achievements
        .iter()
        .map(|a| format!("{} Achievement unlocked: {}\n", a.icon, a.name))
        .collect()
}
