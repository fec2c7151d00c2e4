// receipt-printer/tests/receipt_pipeline.rs
// End-to-end: bill JSON -> receipt text -> ESC/POS job -> printer sink

use receipt_printer::{
    Charset, FilePrinter, NetworkPrinter, PaperWidth, PrintOptions, Printer, ReceiptJob,
    ReceiptTextFormatter,
};
use shared::BillData;
use tempfile::TempDir;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

const BILL_JSON: &str = r#"{
    "restaurant": {
        "name": "Spice Route",
        "addressLine1": "4 Park Street",
        "city": "Kolkata",
        "state": "WB",
        "phone": "033 4000 1234",
        "gstNumber": "19AAACS1234K1Z2",
        "fssaiNumber": "12819001000456"
    },
    "bill": {
        "guestName": "Meera",
        "time": "13:05",
        "date": "18/10/2026",
        "dineIn": true,
        "waiterName": "Arjun",
        "billNumber": "SR-0219"
    },
    "items": [
        { "name": "Masala Dosa", "quantity": 2, "price": 90, "total": 180 },
        { "name": "Filter Coffee", "quantity": 2, "price": 40, "total": 80 },
        { "name": "Hyderabadi Chicken Dum Biryani Family Pack", "quantity": 1, "price": 450, "total": 450 }
    ],
    "currency": "Rs.",
    "totals": {
        "subtotal": 710,
        "serviceCharge": 35.5,
        "cgst": 17.75,
        "sgst": 17.75,
        "gst": 35.5,
        "discount": 20,
        "roundOff": -0.25,
        "grandTotal": 760.5
    },
    "taxRateService": 5,
    "taxRateGst": 5
}"#;

fn bill() -> BillData {
    BillData::from_json(BILL_JSON).unwrap()
}

#[test]
fn test_bill_json_to_receipt_text() {
    let formatter = ReceiptTextFormatter::for_paper(PaperWidth::Mm58);
    let text = formatter.format(&bill());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0].trim(), "SPICE ROUTE");
    assert!(lines.contains(&"Name: Meera"));
    assert!(lines.contains(&"Dine In: true"));
    assert!(lines.contains(&"Waiter: Arjun"));
    assert!(lines.contains(&"Bill No.: SR-0219"));

    // Long name wraps and the amount moves to its own line
    let biryani = lines
        .iter()
        .position(|l| l.starts_with("Hyderabadi"))
        .unwrap();
    assert_eq!(lines[biryani], "Hyderabadi Chicken Dum Biryani");
    assert_eq!(lines[biryani + 1], "Family Pack");
    assert!(lines[biryani + 2].starts_with("1 x Rs.450.00"));
    assert!(lines[biryani + 2].ends_with("Rs.450.00"));

    let labels: Vec<&str> = lines
        .iter()
        .filter_map(|l| l.split("  ").next())
        .collect();
    for label in [
        "Sub Total",
        "Service Charge 5.0%",
        "SGST 2.5%",
        "CGST 2.5%",
        "Discount",
        "Round Off",
        "GRAND TOTAL",
    ] {
        assert!(labels.contains(&label), "missing {label}");
    }
    assert!(text.contains("Rs.-0.25"));
    assert!(text.ends_with("Thank you! Visit Again"));
}

#[test]
fn test_wide_paper_keeps_name_on_one_line() {
    let formatter = ReceiptTextFormatter::for_paper(PaperWidth::Mm80);
    let text = formatter.format(&bill());
    let lines: Vec<&str> = text.lines().collect();

    // 42 + 1 + 9 > 48: the name fits alone, the amount drops below
    let biryani = lines
        .iter()
        .position(|l| *l == "Hyderabadi Chicken Dum Biryani Family Pack")
        .unwrap();
    assert_eq!(lines[biryani + 1], format!("1 x Rs.450.00{}Rs.450.00", " ".repeat(26)));

    // Short names share the line with their amount
    assert!(lines.contains(&format!("Masala Dosa{}Rs.180.00", " ".repeat(28)).as_str()));
}

#[tokio::test]
async fn test_network_printer_receives_job() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        socket.read_to_end(&mut received).await.unwrap();
        received
    });

    let formatter = ReceiptTextFormatter::default();
    let options = PrintOptions {
        charset: Charset::Latin1,
        ..Default::default()
    };
    let job = ReceiptJob::from_bill(&formatter, &bill(), &options);

    let printer = NetworkPrinter::from_addr(&addr.to_string()).unwrap();
    printer.print(job.bytes()).await.unwrap();

    let received = server.await.unwrap();
    assert_eq!(received, job.bytes());
    assert!(received.starts_with(&[0x1B, 0x40, 0x1B, 0x74, 16]));
}

#[tokio::test]
async fn test_network_printer_online_check() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let printer = NetworkPrinter::from_addr(&addr.to_string()).unwrap();
    assert!(printer.is_online().await);

    drop(listener);
    assert!(!printer.is_online().await);
}

#[tokio::test]
async fn test_file_printer_writes_job() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("receipt.bin");
    let printer = FilePrinter::new(&path);
    assert!(printer.is_online().await);

    let text = ReceiptTextFormatter::default().format(&bill());
    let job = ReceiptJob::from_text(&text, &PrintOptions::default());
    printer.print(job.bytes()).await.unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, job.into_bytes());
}
