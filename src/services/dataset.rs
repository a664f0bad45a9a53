//! Synthetic transaction dataset generation.
//!
//! Produces a reproducible set of issued-book rows over the sample library
//! catalog, large enough to exercise the range index.

use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    config::DatasetConfig,
    error::{AppError, AppResult},
    models::{Book, IssuedBook, Transaction, User},
    services::fines::FinePolicy,
};

const MIN_LOAN_DAYS: u64 = 7;
const MAX_LOAN_DAYS: u64 = 30;
/// Share of loans that get returned (when the return falls before `today`)
const RETURN_PROBABILITY: f64 = 0.7;
/// Returns can happen up to this many days after the due date
const MAX_DAYS_LATE: u64 = 15;
/// Share of loans covering a single copy; the rest take two
const SINGLE_COPY_PROBABILITY: f64 = 0.85;

pub static SAMPLE_DOMAINS: &[&str] = &[
    "DBMS",
    "Operating Systems",
    "Computer Networks",
    "Algorithms",
    "Data Structures",
];

pub static SAMPLE_BOOKS: Lazy<Vec<Book>> = Lazy::new(|| {
    [
        ("book-001", "Database System Concepts", "Silberschatz, Korth", "DBMS", "978-0073523323", 5),
        ("book-002", "Fundamentals of Database Systems", "Elmasri, Navathe", "DBMS", "978-0133970777", 4),
        ("book-003", "SQL Performance Explained", "Markus Winand", "DBMS", "978-3950307818", 3),
        ("book-004", "Database Internals", "Alex Petrov", "DBMS", "978-1492040347", 3),
        ("book-005", "Operating System Concepts", "Silberschatz, Galvin", "Operating Systems", "978-1119320913", 6),
        ("book-006", "Modern Operating Systems", "Andrew Tanenbaum", "Operating Systems", "978-0133591620", 5),
        ("book-007", "Operating Systems: Three Easy Pieces", "Remzi Arpaci-Dusseau", "Operating Systems", "978-1985086593", 4),
        ("book-008", "Linux Kernel Development", "Robert Love", "Operating Systems", "978-0672329463", 3),
        ("book-009", "Computer Networks", "Andrew Tanenbaum", "Computer Networks", "978-0132126953", 5),
        ("book-010", "Computer Networking: A Top-Down Approach", "Kurose, Ross", "Computer Networks", "978-0133594140", 5),
        ("book-011", "TCP/IP Illustrated", "W. Richard Stevens", "Computer Networks", "978-0201633467", 3),
        ("book-012", "Network Security Essentials", "William Stallings", "Computer Networks", "978-0134527338", 4),
        ("book-013", "Introduction to Algorithms", "Cormen, Leiserson", "Algorithms", "978-0262033848", 7),
        ("book-014", "Algorithm Design", "Jon Kleinberg", "Algorithms", "978-0321295354", 5),
        ("book-015", "The Algorithm Design Manual", "Steven Skiena", "Algorithms", "978-1848000698", 4),
        ("book-016", "Algorithms", "Robert Sedgewick", "Algorithms", "978-0321573513", 5),
        ("book-017", "Data Structures and Algorithms in Java", "Michael Goodrich", "Data Structures", "978-1118771334", 6),
        ("book-018", "Data Structures Using C", "Reema Thareja", "Data Structures", "978-0198099307", 5),
        ("book-019", "Advanced Data Structures", "Peter Brass", "Data Structures", "978-0521880374", 3),
        ("book-020", "Data Structures and Algorithms Made Easy", "Narasimha Karumanchi", "Data Structures", "978-8192107592", 4),
    ]
    .into_iter()
    .map(|(id, title, author, domain, isbn, quantity)| Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        domain: domain.to_string(),
        isbn: isbn.to_string(),
        quantity,
        available: quantity,
    })
    .collect()
});

pub static SAMPLE_USERS: Lazy<Vec<User>> = Lazy::new(|| {
    [
        ("user-001", "Rahul Sharma", "rahul@student.edu", "9876543210", "Computer Science", false),
        ("user-002", "Priya Patel", "priya@student.edu", "9876543211", "Information Technology", false),
        ("user-003", "Amit Kumar", "amit@student.edu", "9876543212", "Electronics", false),
        ("user-004", "Sneha Reddy", "sneha@student.edu", "9876543213", "Computer Science", false),
        ("user-005", "Vikram Singh", "vikram@student.edu", "9876543214", "Information Technology", false),
        ("user-006", "Anjali Gupta", "anjali@student.edu", "9876543215", "Computer Science", false),
        ("user-007", "Rohan Mehta", "rohan@student.edu", "9876543216", "Electronics", false),
        ("user-008", "Kavya Iyer", "kavya@student.edu", "9876543217", "Information Technology", false),
        ("admin-001", "Admin User", "admin@library.com", "9876543218", "Administration", true),
    ]
    .into_iter()
    .map(|(id, name, email, phone, department, is_admin)| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: Some(phone.to_string()),
        department: department.to_string(),
        is_admin,
    })
    .collect()
});

/// A generated catalog plus its issued-book history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub domains: Vec<String>,
    pub users: Vec<User>,
    pub books: Vec<Book>,
    pub issued_books: Vec<IssuedBook>,
}

impl Dataset {
    /// Denormalize issued rows into transactions using the dataset's catalog
    pub fn transactions(&self) -> Vec<Transaction> {
        self.issued_books
            .iter()
            .map(|issued| {
                let book = self.books.iter().find(|b| b.id == issued.book_id);
                Transaction::from_issued(issued.clone(), book)
            })
            .collect()
    }
}

pub struct DatasetGenerator {
    rng: StdRng,
    size: usize,
    start_date: NaiveDate,
    end_date: NaiveDate,
    today: NaiveDate,
    fines: FinePolicy,
}

impl DatasetGenerator {
    pub fn new(
        config: &DatasetConfig,
        fines: FinePolicy,
        today: NaiveDate,
    ) -> AppResult<Self> {
        if config.start_date > config.end_date {
            return Err(AppError::Validation(format!(
                "Dataset start date {} is after end date {}",
                config.start_date, config.end_date
            )));
        }
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            size: config.size,
            start_date: config.start_date,
            end_date: config.end_date,
            today,
            fines,
        })
    }

    pub fn generate(mut self) -> Dataset {
        let borrowers: Vec<&User> = SAMPLE_USERS.iter().filter(|u| !u.is_admin).collect();
        let span_days = (self.end_date - self.start_date).num_days() as u64;

        let mut issued_books = Vec::with_capacity(self.size);
        for n in 0..self.size {
            // Both slices are non-empty statics.
            let (Some(book), Some(user)) = (
                SAMPLE_BOOKS.choose(&mut self.rng),
                borrowers.choose(&mut self.rng),
            ) else {
                break;
            };

            let issue_date = self.start_date + Days::new(self.rng.gen_range(0..=span_days));
            let due_date = issue_date + Days::new(self.rng.gen_range(MIN_LOAN_DAYS..=MAX_LOAN_DAYS));

            let return_date = if self.rng.gen_bool(RETURN_PROBABILITY) {
                let kept = self.rng.gen_range(1..=(due_date - issue_date).num_days() as u64 + MAX_DAYS_LATE);
                Some(issue_date + Days::new(kept)).filter(|returned| *returned <= self.today)
            } else {
                None
            };

            let quantity = if self.rng.gen_bool(SINGLE_COPY_PROBABILITY) { 1 } else { 2 };

            issued_books.push(IssuedBook {
                id: format!("issued-{:05}", n + 1),
                user_id: user.id.clone(),
                book_id: book.id.clone(),
                book_title: book.title.clone(),
                quantity,
                issue_date: Some(issue_date),
                due_date,
                return_date,
                fine_amount: self.fines.fine(due_date, return_date, self.today),
                status: FinePolicy::status(due_date, return_date, self.today),
                user_name: Some(user.name.clone()),
                department: Some(user.department.clone()),
                author: Some(book.author.clone()),
            });
        }

        tracing::info!(
            transactions = issued_books.len(),
            from = %self.start_date,
            to = %self.end_date,
            "Generated synthetic transaction dataset"
        );

        Dataset {
            domains: SAMPLE_DOMAINS.iter().map(|d| d.to_string()).collect(),
            users: SAMPLE_USERS.clone(),
            books: SAMPLE_BOOKS.clone(),
            issued_books,
        }
    }
}
