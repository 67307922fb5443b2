use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use study_planner::calendar::{day_name, parse_day};
use study_planner::{
    Course, ExamDate, LearningStyle, StudyPlan, StudyProfile, StudyRequest, TimeOfDay,
    UnavailableTime, load_request_from_json, plan_week, save_request_to_json,
};
use std::io::{self, Write};

fn render_rows_as_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&widths, headers.iter().copied()));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(&widths, row.iter().map(String::as_str)));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn render_row<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("|");
    for (ci, cell) in cells.enumerate() {
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(widths[ci].saturating_sub(cell.len())));
        line.push_str(" |");
    }
    line
}

fn render_plan(plan: &StudyPlan) -> String {
    let mut rows = Vec::new();
    for (day, sessions) in plan.schedule.iter() {
        for session in sessions {
            rows.push(vec![
                day_name(day).to_string(),
                session.range().to_string(),
                session.subject().to_string(),
                session.focus().to_string(),
            ]);
        }
    }

    let mut out = render_rows_as_text_table(&["day", "time", "subject", "focus"], &rows);
    let analytics = &plan.analytics;
    out.push_str(&format!(
        "Total study hours  : {}\n",
        analytics.total_study_hours
    ));
    for (subject, hours) in analytics.subject_distribution.iter() {
        out.push_str(&format!("  {:<18}: {}\n", subject, hours));
    }
    out.push_str("Recommendations:\n");
    for recommendation in &analytics.recommendations {
        out.push_str(&format!("  - {}\n", recommendation));
    }
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the current study profile\n  course <name> <priority>           Add or update a course\n  drop <name>                        Remove a course\n  hours <n>                          Set study hours per day\n  break <minutes>                    Set break length between sessions\n  window <HH:MM> <HH:MM>             Set daily start and end time\n  style <name>                       Set learning style\n  styles                             List learning styles\n  block <day> <HH:MM> <HH:MM>        Mark a time range unavailable\n  exam <subject> <YYYY-MM-DD>        Add an exam date\n  today <YYYY-MM-DD>                 Pin the planning date\n  seed <u64>                         Pin the random seed\n  generate                           Build the weekly plan\n  save json <path>                   Save the profile to disk\n  load json <path>                   Load a profile from disk\n  quit|exit                          Exit"
    );
}

fn print_styles() {
    println!("Available learning styles:");
    for (key, description) in LearningStyle::variants() {
        println!("  {:<12} {}", key, description);
    }
}

fn print_profile(profile: &StudyProfile) {
    let request = &profile.request;
    let courses = request
        .courses()
        .iter()
        .map(|c| format!("{} ({})", c.name, c.priority))
        .collect::<Vec<_>>()
        .join(", ");
    let blocks = request
        .unavailable_times
        .iter()
        .map(|u| format!("{} {}-{}", u.day, u.start, u.end))
        .collect::<Vec<_>>()
        .join(", ");
    let exams = request
        .exam_dates
        .iter()
        .map(|e| format!("{} on {}", e.subject, e.date))
        .collect::<Vec<_>>()
        .join(", ");
    println!("Courses            : {}", courses);
    println!(
        "Study hours/day    : {}",
        request.study_hours_per_day.unwrap_or(0.0)
    );
    println!("Break length       : {} min", request.break_length);
    println!(
        "Window             : {} - {}",
        request.start_time, request.end_time
    );
    println!("Learning style     : {}", request.learning_style);
    println!("Unavailable        : {}", blocks);
    println!("Exams              : {}", exams);
    match profile.today {
        Some(date) => println!("Today              : {}", date),
        None => println!("Today              : (local date)"),
    }
    match profile.seed {
        Some(seed) => println!("Seed               : {}", seed),
        None => println!("Seed               : (random)"),
    }
}

fn parse_time_arg(value: &str) -> Option<String> {
    value.parse::<TimeOfDay>().ok().map(|t| t.to_string())
}

fn generate(profile: &StudyProfile) {
    let today = profile.today.unwrap_or_else(|| Local::now().date_naive());
    let mut rng = match profile.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    if !profile.request.has_required_fields() {
        println!("Add at least one course and set study hours before generating.");
        return;
    }
    match plan_week(&profile.request, today, &mut rng) {
        Ok(plan) => println!("Weekly plan\n{}", render_plan(&plan)),
        Err(e) => println!("Error: {}", e),
    }
}

fn main() {
    let mut profile = StudyProfile::new(StudyRequest::default());

    println!("Study Planner (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_profile(&profile),
            "styles" => print_styles(),
            "course" => match (parts.next(), parts.next()) {
                (Some(name), Some(priority_s)) => match priority_s.parse::<f64>() {
                    Ok(priority) if priority.is_finite() && priority >= 0.0 => {
                        profile.request.upsert_course(Course::new(name, priority));
                        println!("Course {} set to priority {}.", name, priority);
                    }
                    _ => println!("Invalid priority"),
                },
                _ => println!("Usage: course <name> <priority>"),
            },
            "drop" => match parts.next() {
                Some(name) => {
                    if profile.request.remove_course(name) {
                        println!("Removed course {}.", name);
                    } else {
                        println!("Course {} not found.", name);
                    }
                }
                None => println!("Usage: drop <name>"),
            },
            "hours" => match parts.next().map(str::parse::<f64>) {
                Some(Ok(hours)) if hours.is_finite() && hours >= 0.0 => {
                    profile.request.study_hours_per_day = Some(hours);
                    println!("Study hours per day set to {}.", hours);
                }
                Some(_) => println!("Invalid hours"),
                None => println!("Usage: hours <n>"),
            },
            "break" => match parts.next().map(str::parse::<u16>) {
                Some(Ok(minutes)) => {
                    profile.request.break_length = minutes;
                    println!("Break length set to {} minutes.", minutes);
                }
                Some(Err(_)) => println!("Invalid minutes"),
                None => println!("Usage: break <minutes>"),
            },
            "window" => match (parts.next(), parts.next()) {
                (Some(start_s), Some(end_s)) => {
                    match (parse_time_arg(start_s), parse_time_arg(end_s)) {
                        (Some(start), Some(end)) if start < end => {
                            println!("Study window set to {} - {}.", start, end);
                            profile.request.start_time = start;
                            profile.request.end_time = end;
                        }
                        (Some(_), Some(_)) => println!("End time must be after start time"),
                        _ => println!("Invalid time (HH:MM)"),
                    }
                }
                _ => println!("Usage: window <HH:MM> <HH:MM>"),
            },
            "style" => match parts.next() {
                Some(style_s) => {
                    let style: LearningStyle =
                        style_s.parse().unwrap_or(LearningStyle::Unspecified);
                    if style == LearningStyle::Unspecified {
                        println!(
                            "Unknown learning style '{}'; only common focus areas will be used.",
                            style_s
                        );
                    } else {
                        println!("Learning style set to {}.", style);
                    }
                    profile.request.learning_style = style_s.to_string();
                }
                None => println!("Usage: style <name>"),
            },
            "block" => match (parts.next(), parts.next(), parts.next()) {
                (Some(day_s), Some(start_s), Some(end_s)) => {
                    let day = match parse_day(day_s) {
                        Ok(day) => day,
                        Err(e) => {
                            println!("Error: {}", e);
                            continue;
                        }
                    };
                    match (parse_time_arg(start_s), parse_time_arg(end_s)) {
                        (Some(start), Some(end)) if start < end => {
                            println!("Blocked {} {} - {}.", day_name(day), start, end);
                            profile.request.unavailable_times.push(UnavailableTime::new(
                                day_name(day),
                                start,
                                end,
                            ));
                        }
                        (Some(_), Some(_)) => println!("End time must be after start time"),
                        _ => println!("Invalid time (HH:MM)"),
                    }
                }
                _ => println!("Usage: block <day> <HH:MM> <HH:MM>"),
            },
            "exam" => match (parts.next(), parts.next()) {
                (Some(subject), Some(date_s)) => {
                    match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                        Ok(date) => {
                            profile
                                .request
                                .exam_dates
                                .push(ExamDate::new(subject, date.to_string()));
                            println!("Exam for {} on {} added.", subject, date);
                        }
                        Err(_) => println!("Invalid date (YYYY-MM-DD)"),
                    }
                }
                _ => println!("Usage: exam <subject> <YYYY-MM-DD>"),
            },
            "today" => match parts.next() {
                Some(date_s) => match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                    Ok(date) => {
                        profile.today = Some(date);
                        println!("Planning date set to {}.", date);
                    }
                    Err(_) => println!("Invalid date (YYYY-MM-DD)"),
                },
                None => println!("Usage: today <YYYY-MM-DD>"),
            },
            "seed" => match parts.next().map(str::parse::<u64>) {
                Some(Ok(seed)) => {
                    profile.seed = Some(seed);
                    println!("Seed set to {}.", seed);
                }
                Some(Err(_)) => println!("Invalid seed"),
                None => println!("Usage: seed <u64>"),
            },
            "generate" => generate(&profile),
            "save" => match (parts.next(), parts.next()) {
                (Some("json"), Some(path)) => match save_request_to_json(&profile, path) {
                    Ok(()) => println!("Profile saved to {}.", path),
                    Err(e) => println!("Save error: {}", e),
                },
                _ => println!("Usage: save json <path>"),
            },
            "load" => match (parts.next(), parts.next()) {
                (Some("json"), Some(path)) => match load_request_from_json(path) {
                    Ok(loaded) => {
                        profile = loaded;
                        println!("Profile loaded from {}.", path);
                        print_profile(&profile);
                    }
                    Err(e) => println!("Load error: {}", e),
                },
                _ => println!("Usage: load json <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
