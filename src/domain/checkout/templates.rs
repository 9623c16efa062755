//! HTML bodies for checkout mails.

use super::OrderAmount;

/// Subject line for a course enrollment confirmation.
pub fn course_enrollment_subject(course_name: &str) -> String {
    format!("Successfully Enrolled into {}", course_name)
}

pub const PAYMENT_RECEIVED_SUBJECT: &str = "Payment Received";

/// Confirmation sent once per newly enrolled course.
pub fn course_enrollment_email(course_name: &str, first_name: &str) -> String {
    let course_name = escape_html(course_name);
    let first_name = escape_html(first_name);
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><title>Course Registration Confirmation</title></head>
<body style="font-family: Arial, sans-serif; color: #000000;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px; text-align: center;">
    <div style="font-size: 18px; font-weight: bold; margin-bottom: 20px;">Course Registration Confirmation</div>
    <div style="font-size: 16px; margin-bottom: 20px;">
      <p>Dear {first_name},</p>
      <p>You have successfully registered for the course <span style="font-weight: bold;">"{course_name}"</span>. We are excited to have you as a participant!</p>
      <p>Please log in to your learning dashboard to access the course materials and start your learning journey.</p>
    </div>
    <div style="font-size: 14px; color: #999999; margin-top: 20px;">If you have any questions or need assistance, please reach out to our support team.</div>
  </div>
</body>
</html>"#
    )
}

/// Acknowledgement of a captured payment.
pub fn payment_success_email(
    first_name: &str,
    amount: OrderAmount,
    order_id: &str,
    payment_id: &str,
) -> String {
    let first_name = escape_html(first_name);
    let order_id = escape_html(order_id);
    let payment_id = escape_html(payment_id);
    let amount = amount.display_major();
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><title>Payment Confirmation</title></head>
<body style="font-family: Arial, sans-serif; color: #000000;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px; text-align: center;">
    <div style="font-size: 18px; font-weight: bold; margin-bottom: 20px;">Course Payment Received</div>
    <div style="font-size: 16px; margin-bottom: 20px;">
      <p>Dear {first_name},</p>
      <p>We have received a payment of <b>{amount}</b>.</p>
      <p>Your Payment ID is <b>{payment_id}</b></p>
      <p>Your Order ID is <b>{order_id}</b></p>
    </div>
  </div>
</body>
</html>"#
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_email_mentions_course_and_name() {
        let html = course_enrollment_email("Rust 101", "Asha");
        assert!(html.contains("Dear Asha"));
        assert!(html.contains("\"Rust 101\""));
    }

    #[test]
    fn payment_email_shows_major_units() {
        let html = payment_success_email(
            "Asha",
            OrderAmount::from_minor_units(2500),
            "order_1",
            "pay_1",
        );
        assert!(html.contains("<b>25.00</b>"));
        assert!(html.contains("order_1"));
        assert!(html.contains("pay_1"));
    }

    #[test]
    fn user_supplied_text_is_escaped() {
        let html = course_enrollment_email("<script>x</script>", "A&B");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A&amp;B"));
    }

    #[test]
    fn subject_names_the_course() {
        assert_eq!(
            course_enrollment_subject("Rust 101"),
            "Successfully Enrolled into Rust 101"
        );
    }
}
