use serde::Serialize;

/// A portfolio project card. Shown on the projects page and injected into
/// the assistant's context bundle.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub summary: &'static str,
    pub tech: &'static [&'static str],
    pub github: Option<&'static str>,
    pub demo: Option<&'static str>,
    pub highlight_metrics: &'static [&'static str],
}

pub fn projects() -> &'static [Project] {
    PROJECTS
}

const PROJECTS: &[Project] = &[
    Project {
        title: "GitGuide",
        summary: "🚀 Transform GitHub repositories into personalized learning journeys with AI-powered guidance and context-aware chat assistance.",
        tech: &["Next.js", "FastAPI", "PostgreSQL", "Azure OpenAI", "TypeScript"],
        github: Some("https://github.com/prabhakar1234pr/gitguide"),
        demo: Some("https://gitguide.prabhakar.dev"),
        highlight_metrics: &["AI-powered learning paths", "Context-aware chat", "Full-stack architecture"],
    },
    Project {
        title: "Song Popularity ML Pipeline",
        summary: "🎵 Professional-grade ML pipeline predicting song popularity using 600K+ Spotify tracks with ZenML orchestration and MLflow tracking.",
        tech: &["Python", "XGBoost", "ZenML", "MLflow", "FastAPI", "Docker"],
        github: Some("https://github.com/prabhakar1234pr/song-popularity-ml"),
        demo: None,
        highlight_metrics: &["R² ≈ 0.51 accuracy", "600K+ tracks analyzed", "MLOps best practices"],
    },
    Project {
        title: "Blog Manager",
        summary: "📝 Full-stack blog management application with user authentication, CRUD operations, and responsive design.",
        tech: &["React", "Node.js", "Express", "PostgreSQL", "JWT"],
        github: Some("https://github.com/prabhakar1234pr/Blog-manager"),
        demo: Some("https://blog-manager-omega.vercel.app/"),
        highlight_metrics: &["Full CRUD operations", "User authentication", "Responsive UI"],
    },
    Project {
        title: "Traffic Safety Analysis System",
        summary: "🚦 Data-driven analysis of traffic collisions in Montgomery County using ML clustering to identify high-risk zones and infrastructure needs.",
        tech: &["Python", "K-Means", "DBSCAN", "Pandas", "Matplotlib", "Statistical Analysis"],
        github: Some("https://github.com/prabhakar1234pr/traffic-safety-analysis"),
        demo: None,
        highlight_metrics: &["192K+ collision records", "ML clustering analysis", "Safety recommendations"],
    },
    Project {
        title: "Sentiment Analysis ML Model",
        summary: "🎭 Deep learning sentiment analysis for IMDB movie reviews using LSTM networks with Streamlit deployment.",
        tech: &["TensorFlow", "Keras", "LSTM", "Streamlit", "Python", "NLP"],
        github: Some("https://github.com/prabhakar1234pr/sentiment-analysis"),
        demo: Some("https://sentiment-analysis-ml-model-398g7mjum7qmvrbee73afo.streamlit.app/"),
        highlight_metrics: &["LSTM neural network", "Real-time predictions", "Interactive web app"],
    },
    Project {
        title: "Avatar Store",
        summary: "🎨 Modern 3D avatar customization web app built with React, Vite, and Tailwind CSS for immersive user experiences.",
        tech: &["React", "Vite", "Tailwind CSS", "Three.js", "JavaScript"],
        github: Some("https://github.com/prabhakar1234pr/Avatar_Store"),
        demo: None,
        highlight_metrics: &["3D avatar customization", "Hot Module Replacement", "Responsive design"],
    },
    Project {
        title: "AirText",
        summary: "✋ Turn mid-air finger writing into text using computer vision, then generate images from recognized text with AI.",
        tech: &["OpenCV", "MediaPipe", "Streamlit", "Azure OpenAI", "Computer Vision"],
        github: Some("https://github.com/prabhakar1234pr/AirText"),
        demo: None,
        highlight_metrics: &["Hand gesture recognition", "OCR integration", "Text-to-image generation"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_are_non_empty() {
        assert!(!projects().is_empty());
        for p in projects() {
            assert!(!p.title.is_empty());
            assert!(!p.summary.is_empty());
            assert!(!p.tech.is_empty());
        }
    }

    #[test]
    fn first_project_is_gitguide() {
        assert_eq!(projects()[0].title, "GitGuide");
        assert!(projects()[0].github.is_some());
    }
}
