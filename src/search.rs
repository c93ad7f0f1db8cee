// src/search.rs
//! In-memory job search: two optional case-insensitive substring predicates

use crate::types::Job;

/// Filter an already-fetched job list by title and location.
///
/// An empty query makes its predicate always true; otherwise the job field
/// must contain the query as a case-insensitive substring. Both predicates
/// are ANDed and input order is preserved. The whole set is scanned on every
/// call; there is no pagination.
pub fn filter_jobs(jobs: Vec<Job>, title_query: &str, location_query: &str) -> Vec<Job> {
    let title_query = title_query.to_lowercase();
    let location_query = location_query.to_lowercase();

    jobs.into_iter()
        .filter(|job| {
            (title_query.is_empty() || job.title.to_lowercase().contains(&title_query))
                && (location_query.is_empty()
                    || job.location.to_lowercase().contains(&location_query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, location: &str) -> Job {
        Job {
            title: title.to_string(),
            company_name: "Acme".to_string(),
            location: location.to_string(),
            requirements: "none".to_string(),
            qualifications: "none".to_string(),
            posted_at_millis: 0,
            employer_id: "e1".to_string(),
        }
    }

    fn sample_set() -> Vec<Job> {
        vec![
            job("Android Developer", "Lahore"),
            job("Data Scientist", "Karachi"),
            job("Web Developer", "Islamabad"),
        ]
    }

    #[test]
    fn test_empty_queries_are_identity() {
        let jobs = sample_set();
        assert_eq!(filter_jobs(jobs.clone(), "", ""), jobs);
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        let titles: Vec<String> = filter_jobs(sample_set(), "dev", "")
            .into_iter()
            .map(|j| j.title)
            .collect();
        assert_eq!(titles, vec!["Android Developer", "Web Developer"]);

        let upper: Vec<String> = filter_jobs(sample_set(), "DEV", "")
            .into_iter()
            .map(|j| j.title)
            .collect();
        assert_eq!(upper, vec!["Android Developer", "Web Developer"]);
    }

    #[test]
    fn test_location_filter() {
        let matched = filter_jobs(sample_set(), "", "karachi");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Data Scientist");
    }

    #[test]
    fn test_predicates_are_anded() {
        // "dev" matches two titles but only one is in Islamabad
        let matched = filter_jobs(sample_set(), "dev", "islam");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Web Developer");

        assert!(filter_jobs(sample_set(), "dev", "karachi").is_empty());
    }

    #[test]
    fn test_input_order_is_preserved() {
        let mut jobs = sample_set();
        jobs.push(job("Android Developer", "Karachi"));
        let titles: Vec<String> = filter_jobs(jobs, "developer", "")
            .into_iter()
            .map(|j| j.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Android Developer", "Web Developer", "Android Developer"]
        );
    }
}
