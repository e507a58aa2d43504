//! Property tests over small random problems.
//!
//! Each case builds a problem with at most two classes, two days and two
//! periods per day, so the search (and a brute-force oracle) stays cheap.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use u_timetable::models::{DemandRecord, Entry, Routine, Slot, Teacher, TimeInterval};
use u_timetable::solver::is_admissible;
use u_timetable::{Problem, SearchLimits, SearchOutcome, Solver};

const PERIODS: [(&str, &str); 2] = [("07:00", "08:00"), ("08:00", "09:00")];
const SUBJECTS: [&str; 3] = ["Math", "English", "Art"];
const CLASSES: [&str; 2] = ["A", "B"];

/// Raw parameters of a generated problem.
#[derive(Debug, Clone)]
struct Shape {
    classes: usize,
    days: u8,
    periods: usize,
    /// Per teacher, per day: 0 = away, 1 = first period only, 2 = both.
    availability: Vec<Vec<u8>>,
    /// (class, teacher, subject, quota) indices.
    demands: Vec<(usize, usize, usize, u32)>,
}

fn shape() -> impl Strategy<Value = Shape> {
    (
        1usize..=2,
        1u8..=2,
        1usize..=2,
        prop::collection::vec(prop::collection::vec(0u8..3, 2), 1..=3),
        prop::collection::vec((0usize..2, 0usize..3, 0usize..3, 1u32..=2), 0..=4),
    )
        .prop_map(|(classes, days, periods, availability, demands)| Shape {
            classes,
            days,
            periods,
            availability,
            demands,
        })
}

fn iv(day: u8, start: &str, end: &str) -> TimeInterval {
    TimeInterval::parse(day, start, end).unwrap()
}

fn build(shape: &Shape) -> Problem {
    let mut slots = Vec::new();
    for class in &CLASSES[..shape.classes] {
        for (start, end) in &PERIODS[..shape.periods] {
            for day in 0..shape.days {
                slots.push(Slot::new(*class, iv(day, start, end)));
            }
        }
    }

    let teachers: Vec<Arc<Teacher>> = shape
        .availability
        .iter()
        .enumerate()
        .map(|(i, days)| {
            let windows = days.iter().enumerate().filter_map(|(day, kind)| match *kind {
                1 => Some(iv(day as u8, "07:00", "08:00")),
                2 => Some(iv(day as u8, "07:00", "09:00")),
                _ => None,
            });
            Arc::new(Teacher::new(format!("T{i}")).with_windows(windows))
        })
        .collect();

    let mut seen = HashSet::new();
    let mut demands = Vec::new();
    for &(class, teacher, subject, quota) in &shape.demands {
        let class = class % shape.classes;
        let teacher = teacher % teachers.len();
        if seen.insert((class, teacher, subject)) {
            demands.push(Arc::new(DemandRecord::new(
                CLASSES[class],
                teachers[teacher].clone(),
                SUBJECTS[subject],
                quota,
            )));
        }
    }

    Problem::new(slots, demands).expect("generated problem is well-formed")
}

fn solve(problem: &Problem) -> SearchOutcome {
    Solver::new()
        .with_limits(SearchLimits::none().with_max_nodes(500_000))
        .solve(problem)
        .outcome
}

/// Whether any complete assignment satisfies every rule, by enumeration.
fn brute_force_feasible(problem: &Problem) -> bool {
    let options: Vec<Vec<Option<Arc<DemandRecord>>>> = problem
        .slots()
        .iter()
        .map(|slot| {
            let mut v: Vec<_> = problem
                .demands()
                .iter()
                .filter(|d| d.class == slot.class)
                .cloned()
                .map(Some)
                .collect();
            v.push(None);
            v
        })
        .collect();

    let mut choice = vec![0usize; options.len()];
    loop {
        let picked: Vec<Option<&Arc<DemandRecord>>> = choice
            .iter()
            .zip(&options)
            .map(|(&c, opts)| opts[c].as_ref())
            .collect();
        if satisfies_all(problem.slots(), problem.demands(), &picked) {
            return true;
        }
        // Odometer increment.
        let mut i = 0;
        loop {
            if i == choice.len() {
                return false;
            }
            choice[i] += 1;
            if choice[i] < options[i].len() {
                break;
            }
            choice[i] = 0;
            i += 1;
        }
    }
}

fn satisfies_all(
    slots: &[Slot],
    demands: &[Arc<DemandRecord>],
    picked: &[Option<&Arc<DemandRecord>>],
) -> bool {
    let lessons: Vec<(&Slot, &Arc<DemandRecord>)> = slots
        .iter()
        .zip(picked)
        .filter_map(|(s, d)| d.map(|d| (s, d)))
        .collect();
    if lessons.is_empty() {
        return false;
    }
    for d in demands {
        if lessons.iter().filter(|(_, l)| *l == d).count() != d.periods_per_week as usize {
            return false;
        }
    }
    for (i, (slot, d)) in lessons.iter().enumerate() {
        if !d.teacher.is_available(&slot.interval) {
            return false;
        }
        for (other_slot, other) in &lessons[i + 1..] {
            if other.teacher.id == d.teacher.id && other_slot.interval == slot.interval {
                return false;
            }
            if other == d && other_slot.class == slot.class && other_slot.day() == slot.day() {
                return false;
            }
        }
    }
    true
}

fn branch_count(problem: &Problem) -> u64 {
    problem
        .slots()
        .iter()
        .map(|slot| {
            1 + problem
                .demands()
                .iter()
                .filter(|d| d.class == slot.class)
                .count() as u64
        })
        .product()
}

fn assert_routine_invariants(problem: &Problem, routine: &Routine) {
    assert!(routine.is_fully_decided());

    // Quota exactness.
    for d in problem.demands() {
        assert_eq!(routine.lesson_count(d), d.periods_per_week as usize, "{d}");
    }

    let lessons: Vec<_> = routine.lessons().collect();
    for (i, (slot, d)) in lessons.iter().enumerate() {
        // Availability respected.
        assert!(d.teacher.is_available(&slot.interval), "{d} at {slot}");
        for (other_slot, other) in &lessons[i + 1..] {
            // One lesson per demand per class-day.
            assert!(
                !(other == d && other_slot.class == slot.class && other_slot.day() == slot.day()),
                "{d} twice on day {}",
                slot.day()
            );
        }
    }

    // Booking index mirrors the lessons and has no duplicates.
    for d in problem.demands() {
        let booked = routine.booked_intervals(d.teacher_id());
        let unique: HashSet<_> = booked.iter().collect();
        assert_eq!(unique.len(), booked.len(), "{} double-booked", d.teacher_id());
        let taught = lessons
            .iter()
            .filter(|(_, l)| l.teacher_id() == d.teacher_id())
            .count();
        assert_eq!(booked.len(), taught);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn solved_routines_satisfy_every_rule(shape in shape()) {
        let problem = build(&shape);
        if let SearchOutcome::Solved(routine) = solve(&problem) {
            assert_routine_invariants(&problem, &routine);
        }
    }

    #[test]
    fn search_is_deterministic(shape in shape()) {
        let problem = build(&shape);
        let first = Solver::new().solve(&problem);
        let second = Solver::new().solve(&problem);

        prop_assert_eq!(first.stats.nodes, second.stats.nodes);
        prop_assert_eq!(first.stats.backtracks, second.stats.backtracks);
        match (&first.outcome, &second.outcome) {
            (SearchOutcome::Solved(a), SearchOutcome::Solved(b)) => {
                let a: Vec<_> = a.entries().map(|(s, e)| (s.clone(), e.clone())).collect();
                let b: Vec<_> = b.entries().map(|(s, e)| (s.clone(), e.clone())).collect();
                prop_assert_eq!(a, b);
            }
            (SearchOutcome::NoSolution, SearchOutcome::NoSolution) => {}
            (a, b) => prop_assert!(false, "outcomes differ: {:?} vs {:?}", a, b),
        }
    }

    #[test]
    fn search_is_complete(shape in shape()) {
        let problem = build(&shape);
        prop_assume!(branch_count(&problem) <= 20_000);
        let expected = brute_force_feasible(&problem);
        match solve(&problem) {
            SearchOutcome::Solved(_) => prop_assert!(expected, "solver found a routine the oracle rejects"),
            SearchOutcome::NoSolution => prop_assert!(!expected, "solver missed a feasible routine"),
            SearchOutcome::Aborted(reason) => prop_assert!(false, "aborted: {}", reason),
        }
    }

    #[test]
    fn undoing_every_assignment_leaves_no_bookings(
        shape in shape(),
        picks in prop::collection::vec(0usize..8, 8),
    ) {
        let problem = build(&shape);
        let mut routine = Routine::new(problem.slots().iter().cloned());
        let mut assigned = Vec::new();

        for (slot, pick) in problem.slots().iter().zip(&picks) {
            let candidates: Vec<_> = problem
                .demands()
                .iter()
                .filter(|d| d.class == slot.class)
                .collect();
            let entry = match candidates.get(*pick) {
                Some(d) if is_admissible(&routine, slot, d) => Entry::Lesson((*d).clone()),
                _ => Entry::Free,
            };
            routine.assign(slot, entry).unwrap();
            assigned.push(slot.clone());
        }

        // Undo in an order different from assignment.
        assigned.reverse();
        let mid = assigned.len() / 2;
        assigned.rotate_left(mid);
        for slot in &assigned {
            routine.unassign(slot).unwrap();
        }

        prop_assert!(routine.is_empty());
        prop_assert!(routine.has_no_bookings());
        for d in problem.demands() {
            prop_assert!(routine.booked_intervals(d.teacher_id()).is_empty());
        }
    }
}
