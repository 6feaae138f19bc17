//! Static records the marketing pages are assembled from.

use crate::domain::model::{Client, Course, Position, Testimonial, TestimonialKind};
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub clients: Vec<Client>,
    pub testimonials: Vec<Testimonial>,
    pub positions: Vec<Position>,
    pub courses: Vec<Course>,
}

impl Catalog {
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| Catalog {
            clients: clients(),
            testimonials: testimonials(),
            positions: positions(),
            courses: courses(),
        })
    }

    pub fn testimonials_of(&self, kind: Option<TestimonialKind>) -> Vec<Testimonial> {
        self.testimonials
            .iter()
            .filter(|t| kind.map_or(true, |k| t.kind == k))
            .cloned()
            .collect()
    }

    pub fn position(&self, title: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.title == title)
    }
}

fn client(name: &str, logo: &str, dark_logo: bool) -> Client {
    Client {
        name: name.to_string(),
        logo: logo.to_string(),
        dark_logo,
    }
}

fn clients() -> Vec<Client> {
    vec![
        client("NMDC Group", "/images/clients/nmdc.png", false),
        client("ARCA Technologies", "/images/clients/arca.png", false),
        client("Art Central", "/images/clients/artcentral.png", false),
        client("China Harbour", "/images/clients/china-harbour.png", false),
        client("Euro Mechanical", "/images/clients/euromechanical.png", false),
        client("Galleria", "/images/clients/galleria.png", true),
        client("KEZAD", "/images/clients/kezad.png", false),
        client("Yas", "/images/clients/yas.png", true),
    ]
}

fn testimonial(
    id: u32,
    name: &str,
    role: &str,
    company: Option<&str>,
    text: &str,
    kind: TestimonialKind,
) -> Testimonial {
    Testimonial {
        id,
        name: name.to_string(),
        role: role.to_string(),
        company: company.map(str::to_string),
        text: text.to_string(),
        kind,
    }
}

fn testimonials() -> Vec<Testimonial> {
    use TestimonialKind::{Client, Student};

    const FIRM: &str = "SAAR Project Related Construction Firm";
    vec![
        testimonial(
            1,
            "Construction Firm Representative",
            "Project Partner",
            Some(FIRM),
            "SAAR's MEP design services exceeded our expectations: efficient, compliant, and well-coordinated.",
            Client,
        ),
        testimonial(
            2,
            "SAAR MEP Academy Alumnus",
            "MEP Design Engineer",
            None,
            "The Academy's training gave me real project exposure. I got placed in a leading MEP firm within 2 months.",
            Student,
        ),
        testimonial(
            3,
            "Construction Firm Representative",
            "Project Partner",
            Some(FIRM),
            "Working with SAAR has been a game-changer. Their value engineering approach saved us significant costs while maintaining the highest quality standards.",
            Client,
        ),
        testimonial(
            4,
            "Rajesh Kumar",
            "MEP Design Engineer",
            None,
            "The Professional Diploma program gave me the confidence and skills to excel in my career. The hands-on training with real projects was invaluable.",
            Student,
        ),
        testimonial(
            5,
            "Sarah Ahmed",
            "HVAC Designer",
            None,
            "SAAR MEP Academy's Revit MEP course transformed my career. The instructors are knowledgeable and the curriculum is industry-relevant.",
            Student,
        ),
        testimonial(
            6,
            "Vikram Singh",
            "Electrical Design Engineer",
            None,
            "The placement support and industry connections I gained through the academy helped me land my dream job. Highly recommended!",
            Student,
        ),
    ]
}

fn position(title: &str, department: &str, description: &str, requirements: &[&str]) -> Position {
    Position {
        title: title.to_string(),
        department: department.to_string(),
        description: description.to_string(),
        requirements: requirements.iter().map(|r| r.to_string()).collect(),
    }
}

fn positions() -> Vec<Position> {
    vec![
        position(
            "MEP Design Engineers",
            "Engineering consultancy",
            "We are seeking experienced MEP Design Engineers with expertise in HVAC, electrical, or plumbing systems design. Candidates should have strong technical skills and experience with BIM software.",
            &[
                "Bachelor's degree in Mechanical/Electrical Engineering",
                "3+ years of MEP design experience",
                "Proficiency in AutoCAD, Revit MEP",
                "Knowledge of local and international codes",
            ],
        ),
        position(
            "Electrical / Mechanical / HVAC Designers & Draftsmen",
            "Design",
            "Join our design team as a Designer or Draftsman specializing in electrical, mechanical, or HVAC systems. Work on diverse projects and grow your career with us.",
            &[
                "Diploma or degree in relevant field",
                "2+ years of drafting/design experience",
                "Strong AutoCAD and Revit skills",
                "Attention to detail and accuracy",
            ],
        ),
        position(
            "Trainers (HVAC, Electrical, Plumbing)",
            "Academy",
            "Share your expertise as a trainer at SAAR MEP Academy. We need experienced professionals to teach HVAC, Electrical, or Plumbing design courses.",
            &[
                "5+ years of industry experience",
                "Strong communication and teaching skills",
                "Passion for education and mentorship",
                "Relevant certifications preferred",
            ],
        ),
        position(
            "Internships for Students",
            "All Departments",
            "We offer internship opportunities for engineering students to gain real-world experience in MEP design and consultancy. Learn from industry experts and work on live projects.",
            &[
                "Currently pursuing engineering degree",
                "Interest in MEP engineering",
                "Basic knowledge of AutoCAD",
                "Willingness to learn and grow",
            ],
        ),
    ]
}

fn courses() -> Vec<Course> {
    [
        ("Professional Diploma in MEP Design", "12 Months"),
        ("HVAC Design & Drafting", "3 Months"),
        ("Electrical Design & Drafting", "3 Months"),
        ("Plumbing & Firefighting Design & Drafting", "3 Months"),
        ("Revit MEP (BIM)", "2 Months"),
        ("AutoCAD Training", "1 Month"),
        ("Crash Courses / Workshops / Industrial Training", "Flexible"),
        ("Corporate Upskilling Programs", "Custom"),
        ("Online Self-Paced Courses", "Flexible"),
    ]
    .into_iter()
    .map(|(title, duration)| Course {
        title: title.to_string(),
        duration: duration.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.clients.len(), 8);
        assert_eq!(catalog.positions.len(), 4);
        assert!(catalog.clients.iter().filter(|c| c.dark_logo).count() == 2);
        assert!(catalog.position("Internships for Students").is_some());
    }

    #[test]
    fn test_filter_testimonials_by_kind() {
        let catalog = Catalog::builtin();
        let clients = catalog.testimonials_of(Some(TestimonialKind::Client));
        assert!(clients.iter().all(|t| t.kind == TestimonialKind::Client));
        assert!(clients.iter().all(|t| t.company.is_some()));
        assert_eq!(
            catalog.testimonials_of(None).len(),
            catalog.testimonials.len()
        );
    }
}
