#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::progression::StreakMultiplier;
    use crate::shared::date::parse_day;
    use crate::shared::{DomainError, HabitId};
    use chrono::NaiveDate;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn test_create_habit() {
        let habit = Habit::new("  Read  ".to_string(), 15).unwrap();

        assert_eq!(habit.name(), "Read");
        assert_eq!(habit.xp(), 15);
        assert_eq!(habit.streak(), 0);
        assert!(habit.last_completed_date().is_none());
        assert!(!habit.is_selected());
    }

    #[test]
    fn test_create_habit_with_empty_name_fails() {
        match Habit::new("   ".to_string(), 10) {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_first_completion_starts_streak() {
        let mut habit = Habit::new("Run".to_string(), 10).unwrap();
        let xp = habit.complete_on(day("2024-01-01"));

        assert_eq!(xp, 10);
        assert_eq!(habit.streak(), 1);
        assert_eq!(habit.last_completed_date(), Some(day("2024-01-01")));
    }

    #[test]
    fn test_next_day_completion_extends_streak() {
        let mut habit = Habit::builder("Run", 10)
            .streak(3)
            .last_completed_date(Some(day("2024-01-01")))
            .build();

        habit.complete_on(day("2024-01-02"));
        assert_eq!(habit.streak(), 4);
    }

    #[test]
    fn test_same_day_completion_keeps_streak() {
        let mut habit = Habit::builder("Run", 10)
            .streak(3)
            .last_completed_date(Some(day("2024-01-02")))
            .build();

        let xp = habit.complete_on(day("2024-01-02"));
        assert_eq!(habit.streak(), 3);
        assert_eq!(xp, 10);
    }

    #[test]
    fn test_gap_resets_streak() {
        let mut habit = Habit::builder("Run", 10)
            .streak(6)
            .last_completed_date(Some(day("2024-01-01")))
            .build();

        habit.complete_on(day("2024-01-05"));
        assert_eq!(habit.streak(), 1);
    }

    #[test]
    fn test_completion_clears_selection() {
        let mut habit = Habit::builder("Run", 10).selected(true).build();
        habit.complete_on(day("2024-01-01"));
        assert!(!habit.is_selected());
    }

    #[test]
    fn test_submit_selected_sums_xp_and_uses_prior_multiplier() {
        let mut habits = vec![
            Habit::builder("A", 10)
                .streak(2)
                .last_completed_date(Some(day("2024-01-01")))
                .selected(true)
                .build(),
            Habit::builder("B", 20).streak(1).selected(true).build(),
            Habit::builder("C", 40).streak(5).build(),
        ];

        let submission = HabitBoard::submit_selected(&mut habits, day("2024-01-02"));

        assert_eq!(submission.base_xp, 30);
        assert_eq!(submission.completed.len(), 2);
        // Two active streaks before submitting; B only reaches 1 after a reset
        assert_eq!(submission.multiplier, StreakMultiplier::from_active_streaks(2));
        assert_eq!(habits[0].streak(), 3);
        assert_eq!(habits[1].streak(), 1);
        assert_eq!(habits[2].streak(), 5);
        assert!(habits.iter().all(|h| !h.is_selected()));
    }

    #[test]
    fn test_submit_with_ids_rejects_unknown_habit() {
        let mut habits = vec![Habit::builder("A", 10).build()];
        let unknown = HabitId::from_string("missing");

        let result = HabitBoard::submit(&mut habits, &[unknown], day("2024-01-02"));

        assert!(matches!(result, Err(DomainError::HabitNotFound(_))));
        assert_eq!(habits[0].streak(), 0);
    }

    #[test]
    fn test_submit_with_ids_completes_only_listed() {
        let mut habits = vec![
            Habit::builder("A", 10).build(),
            Habit::builder("B", 20).selected(true).build(),
        ];
        let id = habits[0].id().clone();

        let submission = HabitBoard::submit(&mut habits, &[id], day("2024-01-02")).unwrap();

        assert_eq!(submission.base_xp, 10);
        assert_eq!(habits[0].streak(), 1);
        assert_eq!(habits[1].streak(), 0);
    }

    #[test]
    fn test_selection_summary_and_preview() {
        let mut habits = vec![
            Habit::builder("A", 10).streak(2).build(),
            Habit::builder("B", 5).streak(2).build(),
            Habit::builder("C", 7).build(),
        ];
        habits[0].toggle_selection();
        habits[2].toggle_selection();
        assert!(habits[0].is_selected());

        let summary = HabitBoard::selected_summary(&habits);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.base_xp, 17);
        // 17 * 1.2 = 20.4
        assert_eq!(HabitBoard::preview_xp(&habits), 20);
        assert_eq!(HabitBoard::active_streaks(&habits).len(), 2);

        HabitBoard::reset_selections(&mut habits);
        assert_eq!(HabitBoard::selected_summary(&habits).count, 0);
    }

    #[test]
    fn test_deserialize_stored_habit() {
        let json = r#"{
            "id": 1712345678901,
            "name": "Meditate",
            "xp": 15,
            "streak": 2,
            "lastCompletedDate": "2024-01-01",
            "selected": true,
            "completed": false
        }"#;
        let habit: Habit = serde_json::from_str(json).unwrap();

        assert_eq!(habit.id().as_str(), "1712345678901");
        assert_eq!(habit.streak(), 2);
        assert_eq!(habit.last_completed_date(), Some(day("2024-01-01")));
    }

    #[test]
    fn test_deserialize_habit_with_missing_fields() {
        let json = r#"{ "id": "h1", "name": "Stretch", "lastCompletedDate": null }"#;
        let habit: Habit = serde_json::from_str(json).unwrap();

        assert_eq!(habit.xp(), 10);
        assert_eq!(habit.streak(), 0);
        assert!(habit.last_completed_date().is_none());
    }
}
