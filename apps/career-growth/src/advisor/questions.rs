//! The fixed, ordered question set asked by the career advisor.

/// Asked in this order; the answer set preserves it.
pub const QUESTIONS: [&str; 19] = [
    "Do you enjoy solving mathematical problems? (yes/no)",
    "Are you interested in cybersecurity or ethical hacking? (yes/no)",
    "Do you find networking, servers, infrastructure appealing? (yes/no)",
    "Do you like writing code and building software? (yes/no)",
    "Are you interested in databases and data engineering? (yes/no)",
    "Do you enjoy machine learning or AI research? (yes/no)",
    "Do you prefer working on UI/UX and front-end design? (yes/no)",
    "Do you like debugging and maintaining production systems? (yes/no)",
    "Would you enjoy customer-facing and business-oriented IT roles? (yes/no)",
    "Would you like roles involving statistics and analytics? (yes/no)",
    "Do you like research-focused roles that explore new AI techniques? (yes/no)",
    "Does Linux system administration excite you? (yes/no)",
    "Does forensic analysis of cyber attacks excite you? (yes/no)",
    "Do you prefer mobile development (Android/iOS) or web UI? (yes/no)",
    "Do you enjoy detecting edge cases and breaking applications? (yes/no)",
    "Do you enjoy configuring routers, switches and firewalls? (yes/no)",
    "Are you interested in game engines like Unity or Unreal Engine? (yes/no)",
    "Would you enjoy a role in teaching, mentorship, or educational content creation? (yes/no)",
    "How much time daily can you commit to learning? (hours/day)",
];
