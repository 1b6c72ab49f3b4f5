//! Built-in community roster.
//!
//! Provides the fixed set of developer personas every session can browse,
//! match against and chat with.

use super::model::PersonaRecord;

fn persona(
    id: u32,
    name: &str,
    role: &str,
    stack: &str,
    bio: &str,
    avatar: &str,
    style: &str,
) -> PersonaRecord {
    PersonaRecord {
        id,
        name: name.to_string(),
        role: role.to_string(),
        stack: stack.to_string(),
        bio: bio.to_string(),
        avatar: avatar.to_string(),
        style: style.to_string(),
    }
}

/// Returns the community roster in display order.
///
/// Names and ids are unique; `PersonaDirectory::builtin` relies on it.
pub fn get_default_roster() -> Vec<PersonaRecord> {
    vec![
        persona(
            1,
            "Alice Chen",
            "Frontend Architect",
            "React, TypeScript, Tailwind",
            "Obsessed with pixel-perfect UI. I hate backend logic. If it doesn't look good, it doesn't work.",
            "🎨",
            "Visual & Creative",
        ),
        persona(
            2,
            "Bob Smith",
            "Backend Specialist",
            "Python, Django, PostgreSQL",
            "I optimize queries for fun. Frontend CSS scares me. I build robust APIs that never crash.",
            "⚙️",
            "Logical & Blunt",
        ),
        persona(
            3,
            "Charlie Kim",
            "Fullstack Founder",
            "Node.js, MongoDB, AWS",
            "Shipping MVPs in 48 hours. I value speed over code quality. Let's just launch it.",
            "🚀",
            "Energetic & Fast",
        ),
        persona(
            4,
            "Dana White",
            "AI Engineer",
            "PyTorch, HuggingFace, LangChain",
            "Fine-tuning LLMs and building RAG pipelines. I speak in vectors and embeddings.",
            "🧠",
            "Academic & Complex",
        ),
        persona(
            5,
            "Evan Wright",
            "DevOps Engineer",
            "Docker, Kubernetes, Terraform",
            "If you deploy manually, we can't be friends. I automate everything.",
            "🐳",
            "Strict & Organized",
        ),
        persona(
            6,
            "Fiona Gallagher",
            "Mobile Dev",
            "Flutter, Dart, Firebase",
            "Building cross-platform apps. I care about touch interactions and 60fps performance.",
            "📱",
            "User-Focused",
        ),
        persona(
            7,
            "Greg House",
            "Cybersecurity",
            "Kali Linux, Penetration Testing",
            "I break things to make them stronger. Your API keys are probably leaked already.",
            "🔒",
            "Paranoid & Careful",
        ),
        persona(
            8,
            "Hannah Lee",
            "Game Developer",
            "Unity, C#, Shader Graph",
            "Making indie games. I know 3D math and physics engines. Gamers are the toughest users.",
            "🎮",
            "Playful & Technical",
        ),
        persona(
            9,
            "Ian Malcolm",
            "Data Scientist",
            "R, Pandas, Tableau",
            "Data tells a story. I clean messy datasets and find hidden trends.",
            "📊",
            "Analytical",
        ),
        persona(
            10,
            "Jack Sparrow",
            "Blockchain Dev",
            "Solidity, Rust, Web3.js",
            "Building decentralized apps. Code is law. WAGMI.",
            "⛓️",
            "Crypto-Native",
        ),
        persona(
            11,
            "Karen Page",
            "Project Manager",
            "Jira, Agile, Scrum",
            "I keep developers on track. No, we cannot add that feature in this sprint.",
            "📅",
            "Organized & Pushy",
        ),
        persona(
            12,
            "Leo Messi",
            "Junior Dev",
            "HTML, CSS, JavaScript",
            "Just graduated bootcamp! Eager to learn everything. Looking for a mentor.",
            "🎓",
            "Curious & Humble",
        ),
    ]
}
