//! Demonstration data
//!
//! Ten courses and ten students with preassigned enrollments. Loaded through
//! the service layer so the same validation applies.

use std::collections::HashMap;

use coursebook_core::CourseId;

use crate::db::{CourseStore, EnrollmentQuery, StudentStore};
use crate::service::{CourseForm, CourseService, ServiceResult, StudentForm, StudentService};

/// (code, name, credits, description)
const COURSES: &[(&str, &str, i32, &str)] = &[
    ("CS101", "Introduction to Programming", 4, "Basics of programming using Java"),
    ("CS201", "Data Structures and Algorithms", 4, "Study of data structures and algorithms"),
    ("CS301", "Database Management Systems", 3, "Relational databases and SQL"),
    ("CS302", "Operating Systems", 4, "Process management, memory management"),
    ("CS401", "Software Engineering", 3, "Software development lifecycle"),
    ("MA101", "Calculus I", 4, "Differential and integral calculus"),
    ("MA201", "Linear Algebra", 3, "Vector spaces and matrices"),
    ("PH101", "Physics I", 4, "Mechanics and thermodynamics"),
    ("EE201", "Digital Electronics", 3, "Logic gates and circuits"),
    ("CS501", "Machine Learning", 4, "Introduction to ML algorithms"),
];

/// (name, email, department, semester, course codes)
const STUDENTS: &[(&str, &str, &str, i32, &[&str])] = &[
    ("Rahul Sharma", "rahul.sharma@example.com", "Computer Science", 3, &["CS101", "CS201", "CS301"]),
    ("Priya Patel", "priya.patel@example.com", "Computer Science", 4, &["CS201", "CS302", "CS401"]),
    ("Amit Kumar", "amit.kumar@example.com", "Electronics", 2, &["MA101", "PH101", "EE201"]),
    ("Neha Singh", "neha.singh@example.com", "Computer Science", 5, &["CS301", "CS401", "CS501"]),
    ("Vikas Verma", "vikas.verma@example.com", "Mathematics", 3, &["MA101", "MA201"]),
    ("Anjali Desai", "anjali.desai@example.com", "Computer Science", 2, &["CS101", "MA101", "PH101"]),
    ("Rohan Gupta", "rohan.gupta@example.com", "Electronics", 4, &["CS302", "EE201"]),
    ("Kavita Reddy", "kavita.reddy@example.com", "Computer Science", 6, &["CS401", "CS501"]),
    ("Sanjay Mehta", "sanjay.mehta@example.com", "Physics", 1, &["MA101", "PH101"]),
    ("Deepika Iyer", "deepika.iyer@example.com", "Computer Science", 3, &["CS201", "CS301", "CS302"]),
];

/// What a seeding run did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub courses: usize,
    pub students: usize,
    pub enrollments: usize,
    /// Data already present; nothing was written
    pub skipped: bool,
}

/// Load the demonstration data unless any course already exists.
pub async fn seed_demo_data<C, S>(
    courses: &CourseService<C>,
    students: &StudentService<S, C>,
) -> ServiceResult<SeedReport>
where
    C: CourseStore,
    S: StudentStore + EnrollmentQuery,
{
    if !courses.list_courses().await?.is_empty() {
        tracing::info!("courses already present, skipping demo data");
        return Ok(SeedReport {
            skipped: true,
            ..SeedReport::default()
        });
    }

    let mut report = SeedReport::default();
    let mut ids: HashMap<&str, CourseId> = HashMap::new();

    for &(code, name, credits, description) in COURSES {
        let course = courses
            .create_course(&CourseForm {
                course_code: code.to_string(),
                course_name: name.to_string(),
                credits,
                description: Some(description.to_string()),
            })
            .await?;
        ids.insert(code, course.id);
        report.courses += 1;
    }

    for &(name, email, department, semester, codes) in STUDENTS {
        let course_ids: Vec<CourseId> = codes.iter().filter_map(|c| ids.get(c).copied()).collect();
        let student = students
            .create_student(&StudentForm {
                name: name.to_string(),
                email: email.to_string(),
                department: department.to_string(),
                semester,
                course_ids,
            })
            .await?;
        report.students += 1;
        report.enrollments += student.courses.len();
    }

    tracing::info!(
        courses = report.courses,
        students = report.students,
        enrollments = report.enrollments,
        "demo data loaded"
    );
    Ok(report)
}
