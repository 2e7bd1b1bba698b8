//! Use-case pattern catalog and keyword matcher
//!
//! Each pattern pairs a recognized natural-language intent with the schema
//! it needs and a template query. Matching is weighted substring scanning:
//! primary keywords score 3 (specific to the use case), secondary keywords
//! score 1 (general terms that need context). Keyword sets mix Korean and
//! English because questions arrive in both.

use tracing::debug;

/// A static catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPattern {
    pub id: &'static str,
    pub name: &'static str,
    pub primary_keywords: &'static [&'static str],
    pub secondary_keywords: &'static [&'static str],
    pub required_nodes: &'static [&'static str],
    pub required_properties: &'static [&'static str],
    pub required_edges: &'static [&'static str],
    pub template_query: &'static str,
    pub example_questions: &'static [&'static str],
}

/// Points per primary keyword occurrence
const PRIMARY_WEIGHT: u32 = 3;
/// Points per secondary keyword occurrence
const SECONDARY_WEIGHT: u32 = 1;
/// A single secondary keyword is not enough to accept a match
pub const DEFAULT_MIN_SCORE: u32 = 2;

/// The full use-case catalog
pub const QUERY_PATTERNS: &[QueryPattern] = &[
    QueryPattern {
        id: "UC-007",
        name: "Process Bottleneck Diagnosis",
        primary_keywords: &[
            "병목",
            "bottleneck",
            "지연되",
            "오래 걸",
            "taking long",
            "taking so long",
            "slow process",
        ],
        secondary_keywords: &["단계", "stage", "process", "프로세스", "delay", "slow", "오래"],
        required_nodes: &["Application", "Recruitment Stage", "Stage Transition"],
        required_properties: &["current_stage", "timestamp", "benchmark"],
        required_edges: &["PROGRESSES_TO"],
        template_query: "MATCH (a:Application)-[:PROGRESSES_TO]->(s:Recruitment_Stage)\n\
WITH s, avg(a.stage_duration) as avg_time\n\
WHERE avg_time > s.benchmark\n\
RETURN s.name AS bottleneck_stage,\n\
       avg_time AS avg_days,\n\
       s.benchmark AS target_days,\n\
       avg_time - s.benchmark AS delay_days\n\
ORDER BY delay_days DESC",
        example_questions: &[
            "채용 프로세스에서 병목이 어디야?",
            "Why is hiring taking so long?",
            "어느 단계에서 지연되는지 알려줘",
        ],
    },
    QueryPattern {
        id: "UC-011",
        name: "Next Action Reminder",
        primary_keywords: &[
            "팔로업",
            "follow up",
            "followup",
            "할 일",
            "해야 할",
            "todo",
            "to-do",
            "리마인더",
            "reminder",
        ],
        secondary_keywords: &["연락", "contact", "action", "next", "schedule", "일정", "task"],
        required_nodes: &["Application", "Task", "Recruiter", "Communication"],
        required_properties: &["last_contact", "due_date", "assigned_recruiter"],
        required_edges: &["ASSIGNS", "COMMUNICATES_WITH"],
        template_query: "MATCH (r:Recruiter)-[:ASSIGNS]->(a:Application)\n\
OPTIONAL MATCH (r)-[:COMMUNICATES_WITH]->(c:Candidate)\n\
WHERE date(a.last_contact) < date() - duration('P5D')\n\
RETURN r.name AS recruiter,\n\
       a.candidate_name AS candidate,\n\
       a.last_contact AS last_contacted,\n\
       \"Follow-up Required\" AS action_type\n\
ORDER BY a.last_contact ASC\n\
LIMIT 10",
        example_questions: &[
            "오늘 해야 할 일이 뭐야?",
            "Who do I need to follow up with?",
            "연락 안 한 후보자 알려줘",
        ],
    },
    QueryPattern {
        id: "UC-003",
        name: "Re-applicant Context Provider",
        primary_keywords: &[
            "재지원",
            "re-applicant",
            "reapplicant",
            "다시 지원",
            "또 지원",
            "applied before",
            "previous application",
        ],
        secondary_keywords: &["이력", "history", "과거", "previous", "again", "duplicate", "전에"],
        required_nodes: &["Candidate", "Application"],
        required_properties: &["email", "applied_date", "current_stage"],
        required_edges: &["CREATES"],
        template_query: "MATCH (c:Candidate)<-[:CREATES]-(a:Application)\n\
WITH c, collect(a) AS applications\n\
WHERE size(applications) > 1\n\
UNWIND applications AS app\n\
RETURN c.name AS candidate,\n\
       c.email AS email,\n\
       app.applied_date AS applied,\n\
       app.final_status AS outcome,\n\
       app.rejection_reason AS reason\n\
ORDER BY app.applied_date DESC",
        example_questions: &[
            "이 사람 전에도 지원했나?",
            "Has this candidate applied before?",
            "재지원자 목록 보여줘",
        ],
    },
    QueryPattern {
        id: "UC-008",
        name: "Interviewer Feedback Delay Alert",
        primary_keywords: &[
            "피드백 안",
            "피드백 지연",
            "feedback missing",
            "feedback late",
            "평가 안",
            "안 줘",
            "안 줬",
            "hasn't submitted",
        ],
        secondary_keywords: &[
            "피드백",
            "feedback",
            "면접관",
            "interviewer",
            "평가",
            "evaluation",
            "submit",
            "missing",
        ],
        required_nodes: &["Interview", "Evaluation", "Interviewer"],
        required_properties: &["scheduled_date", "score", "feedback_text"],
        required_edges: &["EVALUATES", "PARTICIPATES_IN"],
        template_query: "MATCH (i:Interview)-[:PARTICIPATES_IN]-(intr:Interviewer)\n\
WHERE i.status = 'Completed'\n\
  AND NOT EXISTS {\n\
    MATCH (intr)-[:EVALUATES]->(e:Evaluation)\n\
    WHERE e.interview_id = i.id\n\
  }\n\
  AND i.scheduled_date < datetime() - duration('P1D')\n\
RETURN intr.name AS interviewer,\n\
       i.scheduled_date AS interview_date,\n\
       datetime() - i.scheduled_date AS overdue_hours,\n\
       \"Feedback Missing\" AS alert_type",
        example_questions: &[
            "피드백 안 준 면접관 누구야?",
            "Who hasn't submitted their feedback?",
            "면접 평가 지연된 거 있어?",
        ],
    },
    QueryPattern {
        id: "UC-023",
        name: "AI Learning Feedback Loop",
        primary_keywords: &[
            "ai 정확",
            "ai accuracy",
            "ai 추천",
            "ai recommendation",
            "ai 성능",
            "ai learning",
            "추천 정확",
        ],
        secondary_keywords: &[
            "ai",
            "학습",
            "accuracy",
            "정확도",
            "recommendation",
            "추천",
            "learn",
            "improve",
            "개선",
        ],
        required_nodes: &["AI Recommendation", "Application", "Evaluation"],
        required_properties: &["confidence_score", "type", "score"],
        required_edges: &["RECOMMENDS_FOR", "VALIDATED_BY"],
        template_query: "MATCH (ai:AI_Recommendation)-[:RECOMMENDS_FOR]->(a:Application)\n\
OPTIONAL MATCH (ai)-[:VALIDATED_BY]->(e:Evaluation)\n\
RETURN ai.type AS recommendation_type,\n\
       avg(ai.confidence_score) AS avg_confidence,\n\
       count(CASE WHEN e IS NOT NULL THEN 1 END) AS validated_count,\n\
       count(ai) AS total_count",
        example_questions: &[
            "AI 추천 정확도가 어때?",
            "How well is the AI learning?",
            "AI가 잘 맞추고 있어?",
        ],
    },
    QueryPattern {
        id: "UC-025",
        name: "Candidate Ghosting Alert",
        primary_keywords: &[
            "잠수",
            "ghosting",
            "ghost",
            "연락두절",
            "응답 없",
            "no response",
            "연락 안 돼",
            "안 받",
        ],
        secondary_keywords: &["응답", "response", "silent", "disappeared", "contact", "노쇼"],
        required_nodes: &["Candidate", "Communication"],
        required_properties: &["avg_response_time", "response_pattern", "channel"],
        required_edges: &["COMMUNICATES_WITH"],
        template_query: "MATCH (c:Candidate)<-[:COMMUNICATES_WITH]-(comm:Communication)\n\
WITH c, max(comm.timestamp) AS last_contact, c.avg_response_time AS avg_response\n\
WHERE datetime() - last_contact > avg_response * 3\n\
RETURN c.name AS candidate,\n\
       c.email AS email,\n\
       last_contact AS last_contacted,\n\
       avg_response AS typical_response_hours,\n\
       \"Ghosting Risk\" AS alert_type",
        example_questions: &[
            "연락 안 되는 후보자 있어?",
            "Who might be ghosting us?",
            "응답 없는 후보자 찾아줘",
        ],
    },
    QueryPattern {
        id: "UC-001",
        name: "Sourcing Priority Scoring",
        primary_keywords: &[
            "소싱",
            "sourcing",
            "우선순위",
            "priority",
            "탤런트풀",
            "talent pool",
            "후보자 찾기",
        ],
        secondary_keywords: &["후보자", "candidate", "연락", "contact", "score", "점수"],
        required_nodes: &["Candidate", "Communication", "Application"],
        required_properties: &["response_rate", "last_contact", "skills"],
        required_edges: &["COMMUNICATES_WITH", "CREATES"],
        template_query: "MATCH (c:Candidate)\n\
OPTIONAL MATCH (c)<-[:COMMUNICATES_WITH]-(comm:Communication)\n\
WITH c, count(comm) as contact_count, c.response_rate as response_rate\n\
RETURN c.name AS candidate,\n\
       c.skills AS skills,\n\
       response_rate AS response_rate,\n\
       contact_count AS contacts,\n\
       response_rate * 0.5 + (1.0 / (contact_count + 1)) * 0.5 AS priority_score\n\
ORDER BY priority_score DESC\n\
LIMIT 20",
        example_questions: &[
            "누구한테 먼저 연락해야 해?",
            "Which candidates should I contact first?",
            "소싱 우선순위 보여줘",
        ],
    },
    QueryPattern {
        id: "UC-006",
        name: "Candidate Response Rate Analysis",
        primary_keywords: &["응답률", "response rate", "응답 분석", "회신율", "연락 성공"],
        secondary_keywords: &["응답", "response", "연락", "contact", "분석", "analysis"],
        required_nodes: &["Candidate", "Communication"],
        required_properties: &["response_rate", "channel", "timestamp"],
        required_edges: &["COMMUNICATES_WITH"],
        template_query: "MATCH (c:Candidate)<-[:COMMUNICATES_WITH]-(comm:Communication)\n\
WITH c, comm.channel AS channel,\n\
     count(CASE WHEN comm.response_time IS NOT NULL THEN 1 END) AS responses,\n\
     count(comm) AS total\n\
RETURN channel,\n\
       count(DISTINCT c) AS candidates,\n\
       avg(toFloat(responses) / total) * 100 AS response_rate\n\
ORDER BY response_rate DESC",
        example_questions: &[
            "채널별 응답률이 어때?",
            "What are the response rates by channel?",
            "어느 채널이 응답률 높아?",
        ],
    },
    QueryPattern {
        id: "UC-009",
        name: "Interviewer Calibration Analysis",
        primary_keywords: &[
            "캘리브레이션",
            "calibration",
            "면접관 평가",
            "평가 일관성",
            "점수 차이",
        ],
        secondary_keywords: &["면접관", "interviewer", "평가", "evaluation", "점수", "score"],
        required_nodes: &["Interviewer", "Evaluation", "Interview"],
        required_properties: &["score", "recommendation"],
        required_edges: &["EVALUATES", "PARTICIPATES_IN"],
        template_query: "MATCH (intr:Interviewer)-[:EVALUATES]->(e:Evaluation)\n\
WITH intr, avg(e.score) AS avg_score, stdev(e.score) AS score_stdev, count(e) AS eval_count\n\
RETURN intr.name AS interviewer,\n\
       eval_count AS evaluations,\n\
       round(avg_score, 2) AS avg_score,\n\
       round(score_stdev, 2) AS score_variance,\n\
       CASE WHEN score_stdev > 1.5 THEN 'High Variance' ELSE 'Consistent' END AS status\n\
ORDER BY score_stdev DESC",
        example_questions: &[
            "면접관별 점수 편차가 어때?",
            "Which interviewers need calibration?",
            "평가 일관성 분석해줘",
        ],
    },
    QueryPattern {
        id: "UC-010",
        name: "Similar Candidate Analysis",
        primary_keywords: &["유사 후보자", "similar candidate", "비슷한 후보자", "후보자 비교"],
        secondary_keywords: &["비교", "compare", "유사", "similar", "스킬", "skill"],
        required_nodes: &["Candidate", "Application", "Skill"],
        required_properties: &["skills", "experience_years"],
        required_edges: &["HAS_SKILL", "CREATES"],
        template_query: "MATCH (c1:Candidate)-[:HAS_SKILL]->(s:Skill)<-[:HAS_SKILL]-(c2:Candidate)\n\
WHERE c1 <> c2\n\
WITH c1, c2, count(s) AS shared_skills\n\
WHERE shared_skills >= 3\n\
RETURN c1.name AS candidate1,\n\
       c2.name AS candidate2,\n\
       shared_skills,\n\
       c1.experience_years AS exp1,\n\
       c2.experience_years AS exp2\n\
ORDER BY shared_skills DESC\n\
LIMIT 10",
        example_questions: &[
            "비슷한 후보자 있어?",
            "Find similar candidates",
            "유사 프로필 분석해줘",
        ],
    },
    QueryPattern {
        id: "UC-012",
        name: "Risk Signal Alert",
        primary_keywords: &["위험 시그널", "risk signal", "red flag", "주의 필요", "bad hire"],
        secondary_keywords: &["위험", "risk", "경고", "warning", "alert"],
        required_nodes: &["Candidate", "Application", "Evaluation", "Reference Check"],
        required_properties: &["score", "recommendation", "red_flags"],
        required_edges: &["EVALUATES", "REFERENCES"],
        template_query: "MATCH (c:Candidate)<-[:EVALUATES]-(e:Evaluation)\n\
WHERE e.recommendation IN ['no_hire', 'concern']\n\
OPTIONAL MATCH (c)<-[:REFERENCES]-(ref:Reference_Check)\n\
WHERE ref.red_flags IS NOT NULL\n\
RETURN c.name AS candidate,\n\
       collect(DISTINCT e.recommendation) AS eval_flags,\n\
       collect(DISTINCT ref.red_flags) AS ref_flags,\n\
       'Review Required' AS status",
        example_questions: &[
            "위험 시그널 있는 후보자 있어?",
            "Any candidates with red flags?",
            "주의 필요한 후보자 알려줘",
        ],
    },
    QueryPattern {
        id: "UC-013",
        name: "Offer Rejection Pattern Analysis",
        primary_keywords: &["오퍼 거절", "offer reject", "거절 사유", "왜 거절", "rejection reason"],
        secondary_keywords: &["거절", "reject", "오퍼", "offer", "사유", "reason"],
        required_nodes: &["Application", "Offer"],
        required_properties: &["offer_status", "rejection_reason"],
        required_edges: &["RECEIVES_OFFER"],
        template_query: "MATCH (a:Application)-[:RECEIVES_OFFER]->(o:Offer)\n\
WHERE o.status = 'rejected'\n\
RETURN o.rejection_reason AS reason,\n\
       count(*) AS count,\n\
       round(count(*) * 100.0 / sum(count(*)) OVER (), 1) AS percentage\n\
ORDER BY count DESC",
        example_questions: &[
            "오퍼 거절 이유가 뭐야?",
            "Why are candidates rejecting offers?",
            "거절 사유 분석해줘",
        ],
    },
    QueryPattern {
        id: "UC-014",
        name: "Offer Risk Prediction",
        primary_keywords: &["오퍼 리스크", "offer risk", "수락 확률", "acceptance probability"],
        secondary_keywords: &["오퍼", "offer", "예측", "predict", "확률", "probability"],
        required_nodes: &["Application", "Candidate", "Offer"],
        required_properties: &["competing_offers", "expected_salary", "offer_amount"],
        required_edges: &["RECEIVES_OFFER"],
        template_query: "MATCH (a:Application)-[:RECEIVES_OFFER]->(o:Offer)\n\
MATCH (a)<-[:CREATES]-(c:Candidate)\n\
RETURN c.name AS candidate,\n\
       o.amount AS offer,\n\
       c.expected_salary AS expected,\n\
       c.competing_offers AS competing,\n\
       CASE WHEN o.amount >= c.expected_salary AND c.competing_offers = 0 THEN 'High'\n\
            WHEN o.amount >= c.expected_salary THEN 'Medium'\n\
            ELSE 'Low' END AS acceptance_likelihood",
        example_questions: &[
            "오퍼 수락 확률이 어때?",
            "What are our offer acceptance risks?",
            "오퍼 리스크 분석해줘",
        ],
    },
    QueryPattern {
        id: "UC-017",
        name: "Duplicate Applicant Detection",
        primary_keywords: &["중복 지원", "duplicate", "같은 사람", "동일 후보자"],
        secondary_keywords: &["중복", "지원자", "applicant", "duplicate"],
        required_nodes: &["Candidate", "Application"],
        required_properties: &["email", "phone", "applied_date"],
        required_edges: &["CREATES"],
        template_query: "MATCH (c:Candidate)<-[:CREATES]-(a:Application)\n\
WITH c.email AS email, collect(a) AS applications\n\
WHERE size(applications) > 1\n\
RETURN email,\n\
       size(applications) AS application_count,\n\
       [app IN applications | app.job_posting_id] AS positions",
        example_questions: &[
            "중복 지원자 있어?",
            "Any duplicate applications?",
            "같은 사람이 여러 번 지원했나?",
        ],
    },
    QueryPattern {
        id: "UC-027",
        name: "Job Posting Funnel Anomaly",
        primary_keywords: &[
            "퍼널 이상",
            "funnel anomaly",
            "공고 문제",
            "지원자 적음",
            "조회수 낮음",
        ],
        secondary_keywords: &["퍼널", "funnel", "공고", "posting", "지원", "application"],
        required_nodes: &["Job Posting", "Application"],
        required_properties: &["view_count", "application_count", "posted_date"],
        required_edges: &["FOR_POSITION"],
        template_query: "MATCH (jp:Job_Posting)\n\
OPTIONAL MATCH (a:Application)-[:FOR_POSITION]->(jp)\n\
WITH jp, count(a) AS apps, jp.view_count AS views\n\
WHERE views > 100 AND toFloat(apps) / views < 0.01\n\
RETURN jp.title AS posting,\n\
       views AS views,\n\
       apps AS applications,\n\
       round(toFloat(apps) / views * 100, 2) AS conversion_rate,\n\
       'Low Conversion' AS alert",
        example_questions: &[
            "공고 중 문제 있는 거 있어?",
            "Any job postings with funnel issues?",
            "지원자가 안 오는 공고 있어?",
        ],
    },
    QueryPattern {
        id: "UC-029",
        name: "Offer Negotiation Simulation",
        primary_keywords: &[
            "협상",
            "negotiation",
            "시뮬레이션",
            "simulation",
            "역제안",
            "counter offer",
        ],
        secondary_keywords: &["오퍼", "offer", "연봉", "salary", "협상"],
        required_nodes: &["Application", "Offer", "Negotiation"],
        required_properties: &["initial_offer", "counter_offer", "final_offer"],
        required_edges: &["RECEIVES_OFFER", "NEGOTIATES"],
        template_query: "MATCH (a:Application)-[:RECEIVES_OFFER]->(o:Offer)\n\
OPTIONAL MATCH (o)<-[:NEGOTIATES]-(n:Negotiation)\n\
WITH o.initial_amount AS initial, n.counter_amount AS counter, o.final_amount AS final, o.status AS status\n\
RETURN initial,\n\
       counter,\n\
       final,\n\
       round((final - initial) / initial * 100, 1) AS increase_pct,\n\
       status",
        example_questions: &[
            "협상하면 얼마나 올려줘야 해?",
            "What counter offers work best?",
            "협상 패턴 분석해줘",
        ],
    },
];

/// Look up a catalog pattern by use-case id
pub fn pattern_by_id(id: &str) -> Option<&'static QueryPattern> {
    QUERY_PATTERNS.iter().find(|p| p.id == id)
}

/// Score a single pattern against a question
pub fn match_score(question: &str, pattern: &QueryPattern) -> u32 {
    let lower = question.to_lowercase();
    let mut score = 0;

    for keyword in pattern.primary_keywords {
        if lower.contains(&keyword.to_lowercase()) {
            score += PRIMARY_WEIGHT;
        }
    }
    for keyword in pattern.secondary_keywords {
        if lower.contains(&keyword.to_lowercase()) {
            score += SECONDARY_WEIGHT;
        }
    }

    score
}

/// Ranks the catalog against a free-text question
pub struct PatternMatcher {
    min_score: u32,
}

impl PatternMatcher {
    pub fn new(min_score: u32) -> Self {
        Self { min_score }
    }

    /// Best pattern by score, or None below the minimum-score gate.
    ///
    /// A linear reduction replacing the best only on a strictly greater
    /// score, so the first pattern in catalog order wins ties.
    pub fn best_match(&self, question: &str) -> Option<(&'static QueryPattern, u32)> {
        let mut best: Option<(&QueryPattern, u32)> = None;

        for pattern in QUERY_PATTERNS {
            let score = match_score(question, pattern);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((pattern, score)),
            }
        }

        let (pattern, score) = best?;
        debug!(pattern = pattern.id, score, "best pattern candidate");
        if score >= self.min_score {
            Some((pattern, score))
        } else {
            None
        }
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_korean_bottleneck_question_matches_uc007() {
        let matcher = PatternMatcher::default();
        let (pattern, score) = matcher
            .best_match("채용 프로세스에서 병목이 어디야?")
            .expect("should match");
        assert_eq!(pattern.id, "UC-007");
        assert!(score >= 2);
    }

    #[test]
    fn test_single_secondary_keyword_is_rejected() {
        let matcher = PatternMatcher::default();
        assert!(matcher.best_match("process").is_none());
    }

    #[test]
    fn test_english_ghosting_question() {
        let matcher = PatternMatcher::default();
        let (pattern, _) = matcher
            .best_match("Who might be ghosting us?")
            .expect("should match");
        assert_eq!(pattern.id, "UC-025");
    }

    #[test]
    fn test_followup_question() {
        let matcher = PatternMatcher::default();
        let (pattern, _) = matcher
            .best_match("Who do I need to follow up with?")
            .expect("should match");
        assert_eq!(pattern.id, "UC-011");
    }

    #[test]
    fn test_scoring_weights() {
        let pattern = pattern_by_id("UC-007").unwrap();
        // One primary (병목) + one secondary (프로세스)
        assert_eq!(match_score("채용 프로세스에서 병목이 어디야?", pattern), 4);
        // Secondary only
        assert_eq!(match_score("process", pattern), 1);
        // Case-insensitive primary
        assert_eq!(match_score("BOTTLENECK?", pattern), 3);
    }

    #[test]
    fn test_keywords_in_both_tiers_count_twice() {
        // "duplicate" and "협상" sit in both keyword tiers, so a single
        // occurrence scores primary + secondary.
        let duplicates = pattern_by_id("UC-017").unwrap();
        assert_eq!(match_score("duplicate", duplicates), 4);
        let negotiation = pattern_by_id("UC-029").unwrap();
        assert_eq!(match_score("협상", negotiation), 4);
    }

    #[test]
    fn test_empty_question_matches_nothing() {
        let matcher = PatternMatcher::default();
        assert!(matcher.best_match("").is_none());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<_> = QUERY_PATTERNS.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), QUERY_PATTERNS.len());
    }
}
