use portfolio_dom::{Document, ElementId};

/// Keyframes and classes the page components toggle at runtime.
pub const STYLESHEET: &str = r"
.circle {
    width: 20px;
    height: 20px;
    border-radius: 50%;
    background: var(--primary);
    margin: 0 5px;
    animation: bounce 1.5s infinite ease-in-out;
}

.circle:nth-child(1) { animation-delay: -0.32s; }
.circle:nth-child(2) { animation-delay: -0.16s; }
.circle:nth-child(3) { animation-delay: 0s; }
.circle:nth-child(4) { animation-delay: 0.16s; }
.circle:nth-child(5) { animation-delay: 0.32s; }

@keyframes bounce {
    0%, 80%, 100% { transform: scale(0); opacity: 0.5; }
    40% { transform: scale(1); opacity: 1; }
}

.notification {
    position: fixed;
    top: 20px;
    right: 20px;
    padding: 15px 20px;
    border-radius: 8px;
    color: white;
    z-index: 10000;
    transform: translateX(400px);
    transition: all 0.3s ease;
    min-width: 300px;
}

.notification.show { transform: translateX(0); }
.notification-success { background: linear-gradient(135deg, #10b981, #059669); }
.notification-error { background: linear-gradient(135deg, #ef4444, #dc2626); }
.notification-info { background: linear-gradient(135deg, #3b82f6, #2563eb); }

.notification-content {
    display: flex;
    align-items: center;
    gap: 10px;
}

@keyframes float {
    0%, 100% { transform: translateY(0px) rotate(0deg); }
    50% { transform: translateY(-20px) rotate(180deg); }
}

@keyframes floatIcon {
    0%, 100% { transform: translateY(0px) rotate(0deg); opacity: 0.7; }
    50% { transform: translateY(-15px) rotate(10deg); opacity: 1; }
}

.entered { animation: slideInUp 0.6s ease forwards; }

@keyframes slideInUp {
    from { opacity: 0; transform: translateY(30px); }
    to { opacity: 1; transform: translateY(0); }
}

.skill-bar {
    width: 0;
    transition: width 1.5s ease-in-out;
}
";

/// Appends a `<style>` element holding [`STYLESHEET`] to the document head.
pub fn inject(document: &mut Document) -> ElementId {
    let head = document.head();
    let style = document.create_element("style");
    document.set_text(style, STYLESHEET.trim_start());
    document.append_child(head, style);
    log::trace!("inject: stylesheet element {style}");
    style
}
