//! Built-in sample recruiting dataset
//!
//! A small synthetic ATS snapshot the query simulator runs against. All
//! timestamps are anchored to a fixed reference date rather than the wall
//! clock so every simulated query returns the same rows on every run.

use chrono::NaiveDate;

/// Reference "today" for all date arithmetic in the simulator
pub fn as_of() -> NaiveDate {
    date(2025, 12, 12)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub skills: &'static [&'static str],
    /// Historical fraction of outreach this candidate answered
    pub response_rate: f64,
    /// Typical days until this candidate replies
    pub avg_response_days: f64,
    /// Prior talent-pool touches, used for sourcing priority
    pub contact_count: u32,
    pub expected_salary: u64,
    pub competing_offers: u32,
}

#[derive(Debug, Clone)]
pub struct JobPosting {
    pub id: &'static str,
    pub title: &'static str,
    pub view_count: u32,
    pub application_count: u32,
}

#[derive(Debug, Clone)]
pub struct Application {
    pub id: &'static str,
    pub candidate_id: &'static str,
    pub job_posting_id: &'static str,
    pub current_stage: &'static str,
    pub applied_date: NaiveDate,
    pub last_contact: NaiveDate,
    pub recruiter_id: &'static str,
    pub final_status: Option<&'static str>,
    pub offer_amount: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct RecruitmentStage {
    pub id: &'static str,
    pub name: &'static str,
    pub order: u32,
    /// Target days an application should spend in this stage
    pub benchmark_days: f64,
}

#[derive(Debug, Clone)]
pub struct StageTransition {
    pub id: &'static str,
    pub application_id: &'static str,
    pub from_stage: &'static str,
    pub to_stage: &'static str,
    pub duration_days: f64,
}

#[derive(Debug, Clone)]
pub struct Interview {
    pub id: &'static str,
    pub application_id: &'static str,
    pub interviewer_id: &'static str,
    pub kind: &'static str,
    pub scheduled_date: NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct Interviewer {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub id: &'static str,
    pub interview_id: &'static str,
    pub interviewer_id: &'static str,
    pub score: f64,
    pub recommendation: &'static str,
    /// None means the interviewer has not turned the evaluation in yet
    pub submitted_at: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct Recruiter {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone)]
pub struct Communication {
    pub id: &'static str,
    pub candidate_id: &'static str,
    pub channel: &'static str,
    pub sent_at: NaiveDate,
    pub responded: bool,
}

#[derive(Debug, Clone)]
pub struct AiRecommendation {
    pub id: &'static str,
    pub application_id: &'static str,
    pub kind: &'static str,
    pub confidence: f64,
    pub validated: bool,
}

/// The full snapshot the executors read
#[derive(Debug, Clone)]
pub struct SampleDataset {
    pub candidates: Vec<Candidate>,
    pub job_postings: Vec<JobPosting>,
    pub applications: Vec<Application>,
    pub stages: Vec<RecruitmentStage>,
    pub transitions: Vec<StageTransition>,
    pub interviews: Vec<Interview>,
    pub interviewers: Vec<Interviewer>,
    pub evaluations: Vec<Evaluation>,
    pub recruiters: Vec<Recruiter>,
    pub communications: Vec<Communication>,
    pub ai_recommendations: Vec<AiRecommendation>,
}

impl SampleDataset {
    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn stage(&self, id: &str) -> Option<&RecruitmentStage> {
        self.stages.iter().find(|s| s.id == id)
    }

    pub fn interviewer(&self, id: &str) -> Option<&Interviewer> {
        self.interviewers.iter().find(|i| i.id == id)
    }

    pub fn recruiter(&self, id: &str) -> Option<&Recruiter> {
        self.recruiters.iter().find(|r| r.id == id)
    }
}

/// Build the snapshot
pub fn sample_dataset() -> SampleDataset {
    SampleDataset {
        candidates: vec![
            Candidate {
                id: "c1",
                name: "Alice Kim",
                email: "alice.kim@example.com",
                skills: &["Rust", "Distributed Systems", "Kafka"],
                response_rate: 0.6,
                avg_response_days: 1.0,
                contact_count: 0,
                expected_salary: 120_000,
                competing_offers: 0,
            },
            Candidate {
                id: "c2",
                name: "Ben Park",
                email: "ben.park@example.com",
                skills: &["TypeScript", "React", "GraphQL"],
                response_rate: 0.5,
                avg_response_days: 2.0,
                contact_count: 1,
                expected_salary: 90_000,
                competing_offers: 1,
            },
            Candidate {
                id: "c3",
                name: "Chloe Lee",
                email: "chloe.lee@example.com",
                skills: &["Python", "Machine Learning"],
                response_rate: 0.2,
                avg_response_days: 3.0,
                contact_count: 4,
                expected_salary: 110_000,
                competing_offers: 0,
            },
            Candidate {
                id: "c4",
                name: "Daniel Choi",
                email: "daniel.choi@example.com",
                skills: &["Java", "Spring", "Kubernetes"],
                response_rate: 0.3,
                avg_response_days: 2.5,
                contact_count: 1,
                expected_salary: 100_000,
                competing_offers: 0,
            },
            Candidate {
                id: "c5",
                name: "Erin Jung",
                email: "erin.jung@example.com",
                skills: &["Go", "Terraform", "AWS"],
                response_rate: 0.6,
                avg_response_days: 1.5,
                contact_count: 0,
                expected_salary: 115_000,
                competing_offers: 2,
            },
        ],
        job_postings: vec![
            JobPosting {
                id: "j1",
                title: "Backend Engineer",
                view_count: 450,
                application_count: 3,
            },
            JobPosting {
                id: "j2",
                title: "ML Engineer",
                view_count: 620,
                application_count: 2,
            },
            JobPosting {
                id: "j3",
                title: "Platform Engineer",
                view_count: 300,
                application_count: 1,
            },
        ],
        applications: vec![
            Application {
                id: "a1",
                candidate_id: "c1",
                job_posting_id: "j1",
                current_stage: "final_interview",
                applied_date: date(2025, 10, 15),
                last_contact: date(2025, 12, 10),
                recruiter_id: "r1",
                final_status: None,
                offer_amount: None,
            },
            Application {
                id: "a2",
                candidate_id: "c2",
                job_posting_id: "j1",
                current_stage: "offer",
                applied_date: date(2025, 10, 1),
                last_contact: date(2025, 12, 1),
                recruiter_id: "r1",
                final_status: None,
                offer_amount: Some(95_000),
            },
            Application {
                id: "a3",
                candidate_id: "c3",
                job_posting_id: "j2",
                current_stage: "technical_interview",
                applied_date: date(2025, 11, 1),
                last_contact: date(2025, 11, 20),
                recruiter_id: "r2",
                final_status: None,
                offer_amount: None,
            },
            Application {
                id: "a4",
                candidate_id: "c4",
                job_posting_id: "j1",
                current_stage: "rejected",
                applied_date: date(2024, 6, 10),
                last_contact: date(2024, 7, 2),
                recruiter_id: "r2",
                final_status: Some("rejected"),
                offer_amount: None,
            },
            Application {
                id: "a5",
                candidate_id: "c4",
                job_posting_id: "j3",
                current_stage: "phone_screen",
                applied_date: date(2025, 11, 28),
                last_contact: date(2025, 12, 9),
                recruiter_id: "r2",
                final_status: None,
                offer_amount: None,
            },
            Application {
                id: "a6",
                candidate_id: "c5",
                job_posting_id: "j2",
                current_stage: "technical_interview",
                applied_date: date(2025, 11, 10),
                last_contact: date(2025, 12, 11),
                recruiter_id: "r1",
                final_status: None,
                offer_amount: None,
            },
        ],
        stages: vec![
            RecruitmentStage {
                id: "applied",
                name: "Applied",
                order: 1,
                benchmark_days: 3.0,
            },
            RecruitmentStage {
                id: "phone_screen",
                name: "Phone Screen",
                order: 2,
                benchmark_days: 5.0,
            },
            RecruitmentStage {
                id: "technical_interview",
                name: "Technical Interview",
                order: 3,
                benchmark_days: 7.0,
            },
            RecruitmentStage {
                id: "final_interview",
                name: "Final Interview",
                order: 4,
                benchmark_days: 5.0,
            },
            RecruitmentStage {
                id: "offer",
                name: "Offer",
                order: 5,
                benchmark_days: 3.0,
            },
        ],
        transitions: vec![
            StageTransition {
                id: "t1",
                application_id: "a1",
                from_stage: "applied",
                to_stage: "phone_screen",
                duration_days: 2.0,
            },
            StageTransition {
                id: "t2",
                application_id: "a2",
                from_stage: "applied",
                to_stage: "phone_screen",
                duration_days: 3.0,
            },
            StageTransition {
                id: "t3",
                application_id: "a1",
                from_stage: "phone_screen",
                to_stage: "technical_interview",
                duration_days: 9.0,
            },
            StageTransition {
                id: "t4",
                application_id: "a2",
                from_stage: "phone_screen",
                to_stage: "technical_interview",
                duration_days: 7.0,
            },
            StageTransition {
                id: "t5",
                application_id: "a1",
                from_stage: "technical_interview",
                to_stage: "final_interview",
                duration_days: 6.0,
            },
            StageTransition {
                id: "t6",
                application_id: "a2",
                from_stage: "technical_interview",
                to_stage: "final_interview",
                duration_days: 10.0,
            },
            StageTransition {
                id: "t7",
                application_id: "a2",
                from_stage: "final_interview",
                to_stage: "offer",
                duration_days: 4.0,
            },
        ],
        interviews: vec![
            Interview {
                id: "v1",
                application_id: "a1",
                interviewer_id: "i1",
                kind: "technical",
                scheduled_date: date(2025, 11, 18),
                completed: true,
            },
            Interview {
                id: "v2",
                application_id: "a2",
                interviewer_id: "i2",
                kind: "technical",
                scheduled_date: date(2025, 11, 5),
                completed: true,
            },
            Interview {
                id: "v3",
                application_id: "a3",
                interviewer_id: "i3",
                kind: "phone_screen",
                scheduled_date: date(2025, 12, 5),
                completed: true,
            },
            Interview {
                id: "v4",
                application_id: "a6",
                interviewer_id: "i1",
                kind: "technical",
                scheduled_date: date(2025, 12, 15),
                completed: false,
            },
        ],
        interviewers: vec![
            Interviewer {
                id: "i1",
                name: "Grace Han",
            },
            Interviewer {
                id: "i2",
                name: "Henry Shin",
            },
            Interviewer {
                id: "i3",
                name: "Irene Kang",
            },
        ],
        evaluations: vec![
            Evaluation {
                id: "e1",
                interview_id: "v1",
                interviewer_id: "i1",
                score: 4.5,
                recommendation: "hire",
                submitted_at: Some(date(2025, 11, 19)),
            },
            Evaluation {
                id: "e2",
                interview_id: "v2",
                interviewer_id: "i2",
                score: 3.0,
                recommendation: "concern",
                submitted_at: Some(date(2025, 11, 7)),
            },
            Evaluation {
                id: "e3",
                interview_id: "v3",
                interviewer_id: "i3",
                score: 4.0,
                recommendation: "hire",
                submitted_at: None,
            },
            Evaluation {
                id: "e4",
                interview_id: "v1",
                interviewer_id: "i1",
                score: 2.5,
                recommendation: "no_hire",
                submitted_at: Some(date(2025, 11, 20)),
            },
        ],
        recruiters: vec![
            Recruiter {
                id: "r1",
                name: "Jin Oh",
            },
            Recruiter {
                id: "r2",
                name: "Kate Yoon",
            },
        ],
        communications: vec![
            Communication {
                id: "m1",
                candidate_id: "c1",
                channel: "email",
                sent_at: date(2025, 12, 10),
                responded: true,
            },
            Communication {
                id: "m2",
                candidate_id: "c2",
                channel: "email",
                sent_at: date(2025, 12, 1),
                responded: true,
            },
            Communication {
                id: "m3",
                candidate_id: "c3",
                channel: "email",
                sent_at: date(2025, 11, 25),
                responded: false,
            },
            Communication {
                id: "m4",
                candidate_id: "c1",
                channel: "phone",
                sent_at: date(2025, 12, 11),
                responded: false,
            },
        ],
        ai_recommendations: vec![
            AiRecommendation {
                id: "ai1",
                application_id: "a1",
                kind: "strong_match",
                confidence: 0.92,
                validated: true,
            },
            AiRecommendation {
                id: "ai2",
                application_id: "a2",
                kind: "strong_match",
                confidence: 0.78,
                validated: true,
            },
            AiRecommendation {
                id: "ai3",
                application_id: "a3",
                kind: "weak_match",
                confidence: 0.55,
                validated: false,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_references_resolve() {
        let data = sample_dataset();
        for app in &data.applications {
            assert!(data.candidate(app.candidate_id).is_some());
            assert!(data.recruiter(app.recruiter_id).is_some());
        }
        for t in &data.transitions {
            assert!(data.application(t.application_id).is_some());
            assert!(data.stage(t.from_stage).is_some());
            assert!(data.stage(t.to_stage).is_some());
        }
        for e in &data.evaluations {
            assert!(data.interviewer(e.interviewer_id).is_some());
        }
        for m in &data.communications {
            assert!(data.candidate(m.candidate_id).is_some());
        }
    }

    #[test]
    fn test_reference_date_is_fixed() {
        assert_eq!(as_of().to_string(), "2025-12-12");
    }
}
