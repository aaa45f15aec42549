//! The built-in glossary: exam acronyms and calendar topic titles.

pub(super) const BUILTIN: &[(&str, &str)] = &[
  ("ADA", "American Diabetes Association (Guías 2024-2025)"),
  ("AKI", "Acute Kidney Injury (Lesión Renal Aguda - Guías KDIGO)"),
  ("PAI", "Programa Ampliado de Inmunizaciones (Esquema Vacunación Colombia 2025)"),
  ("ERC", "Enfermedad Renal Crónica (Guías KDIGO/Ministerio)"),
  ("EPI", "Enfermedad Pélvica Inflamatoria"),
  ("SARA", "Síndrome de Apnea del Sueño"),
  ("SIVIGILA", "Sistema de Vigilancia en Salud Pública (Colombia)"),
  ("FEMINICIDIO", "Protocolo de Valoración Forense y Vigilancia Epidemiológica (Violencia de Género - Ley 2356)"),
  ("SABA", "Short-Acting Beta Agonist (Salbutamol - Alerta GINA 2024)"),
  ("LABA", "Long-Acting Beta Agonist"),
  ("ICS", "Inhaled Corticosteroids"),
  ("MART", "Maintenance and Reliever Therapy (Asma - GINA 2024)"),
  ("CAD", "Cetoacidosis Diabética (Protocolo: Potasio antes de Insulina)"),
  ("HHS", "Estado Hiperosmolar Hiperglucémico (Hiperosmolaridad no cetósica)"),
  ("SCA", "Síndrome Coronario Agudo (IAMCEST - IAMSEST)"),
  ("TEP", "Tromboembolismo Pulmonar (Escala de Wells + dímero D)"),
  ("TB", "Tuberculosis (tratamiento RHZE - OPS 2024)"),
  ("TCE", "Traumatismo Craneoencefálico (Escala de Glasgow)"),
  ("SRI", "Secuencia Rápida de Intubación"),
  ("CURB", "Criterios de Severidad Neumonía (CURB-65)"),
  ("qSOFA", "Quick SOFA - Criterios Sepsis 3.0"),
  ("LES", "Lupus Eritematoso Sistémico (Anti-Sm, complemento bajo)"),
  ("DPPNI", "Desprendimiento Prematuro Placenta Normoinserta (Urgencia obstétrica)"),
  ("RR", "Riesgo Relativo y Riesgo Absoluto (Bioestadística)"),
  ("LEY ESTATUTARIA 1751", "Ley Estatutaria 1751 de 2015 - Derecho Fundamental a la Salud (Colombia)"),
  ("FALLA CARDÍACA (HFREF)", "Falla Cardíaca con Fracción de Eyección Reducida - Regla de los 4 Fantásticos (IECA/ARA2, BB, ARM, iSGLT2)"),
  ("ASMA (MART)", "Asma Bronquial - Estrategia MART (GINA 2024): ICS/Formoterol como rescate y mantenimiento"),
  ("DENGUE (INS 2024)", "Dengue - Protocolo INS Colombia 2024: Clasificación, signos de alarma, manejo de líquidos"),
  ("ESTATUS EPILÉPTICO", "Estatus Epiléptico - Protocolo: Benzodiacepinas → Fenitoína → Anestésicos"),
  ("APENDICITIS (ALVARADO)", "Apendicitis Aguda - Score de Alvarado (MANTRELS): diagnóstico y manejo quirúrgico"),
  ("PREECLAMPSIA (ZUSPAN)", "Preeclampsia - Criterios de severidad, Sulfato de Magnesio (Zuspan), Hidralazina"),
  ("REANIMACIÓN NEO", "Reanimación Neonatal - Protocolo AHA/AAP 2022: calor, secar, estimular, FC 100"),
  ("ISGLT2 EN FALLA CARD.", "Inhibidores SGLT2 (Empagliflozina/Dapagliflozina) en Falla Cardíaca - Indicaciones NEJM 2023"),
  ("DENGUE GRAVE", "Dengue Grave - Criterios INS Colombia: choque, hemorragia, fallo orgánico"),
  ("ARTICULO 17 (1751)", "Artículo 17 Ley 1751 - Autonomía del paciente y consentimiento informado en Colombia"),
  ("ADA 2024 (DIABETES)", "Guías ADA 2024 Diabetes: Metas de HbA1c, iSGLT2 en ERC, GLP-1 en obesidad"),
  ("ASMA (SABA WARNING)", "Alerta GINA 2024: SABA solo (sin ICS) aumenta mortalidad por asma - cambio de paradigma"),
  ("VIH (PREP)", "VIH - Profilaxis Pre-Exposición (PrEP): Truvada (TDF/FTC) - Resolución Minsalud Colombia"),
  ("ESTADO HIPEROSMOLAR", "Estado Hiperosmolar Hiperglucémico (HHS): Osmolaridad >320, sin cetosis significativa"),
  ("GUILLAIN-BARRÉ (LCR)", "Síndrome de Guillain-Barré: LCR (disociación albumino-citológica), IVIG o plasmaféresis"),
  ("ARTRITIS REUMATOIDE", "Artritis Reumatoide: Anti-CCP (más específico), FR, metotrexato primera línea"),
  ("COLECISTITIS (MURPHY)", "Colecistitis Aguda - Criterios Tokyo 2018: Signo de Murphy, fiebre, eco abdominal"),
  ("CÓDIGO ROJO (4T)", "Hemorragia Obstétrica - Código Rojo: 4T (Tono, Trauma, Tejido, Trombina)"),
  ("EDA (PLAN B)", "Enfermedad Diarreica Aguda - Plan B de Hidratación OMS: Sales orales 75cc/kg en 4h"),
  ("PAI 2025 (PROTOCOLOS COLOMBIA)", "PAI Colombia 2025 - Esquema de vacunación actualizado: VPH niños, Dengue (Qdenga), Rotavirus"),
  ("FEMINICIDIO (LEY 2356)", "Ley 2356/2024 - Protocolo de atención a víctimas de violencia de género: SIVIGILA 400, ruta intersectorial"),
  ("GLP-1 EN ERC", "Agonistas GLP-1 (Semaglutida/Liraglutida) en Enfermedad Renal Crónica y obesidad - FLOW trial 2024"),
  ("EPOC (GRUPO E)", "EPOC - Clasificación GOLD 2023: Grupo E, broncodilatadores LABA+LAMA, rehabilitación pulmonar"),
  ("VIH (GESTACIONAL)", "VIH en embarazo - PTMH: AZT+3TC+LPV/r, cesárea si CV>1000, suspender lactancia"),
  ("HIPOTIROIDISMO", "Hipotiroidismo primario: TSH elevada, T4L baja, Levotiroxina - casos especiales en embarazo"),
  ("MIASTENIA GRAVIS", "Miastenia Gravis: Anticuerpos anti-AchR, test de Tensilón, crisis miasténica vs colinérgica"),
  ("GOTA (SINOVIAL)", "Gota: Cristales de urato monosódico en líquido sinovial (birrefringencia negativa), colchicina"),
  ("CIRUGÍA HERNIA", "Hernia Inguinal: Lichtensten sin malla en urgencia, laparoscopia electiva"),
  ("MADURACIÓN PULM.", "Maduración Pulmonar Fetal: Betametasona 12mg c/24h x2 dosis (24-34 semanas)"),
  ("BRONQUIOLITIS (WOOD)", "Bronquiolitis - Score de Wood-Downes: O2, hidratación, NO broncodilatadores rutinarios (evidencia)"),
  ("VACUNA DENGUE (QDENGA)", "Vacuna Dengue Qdenga (TAK-003): Solo en seropositivos, 2 dosis, 9-60 años - PAI 2025"),
  ("PROTOCOLO SIVIGE", "SIVIGILA: Notificación obligatoria de eventos de interés en salud pública Colombia - SIVIGE"),
  ("SCA (IAMCEST)", "IAMCEST: Supradesnivel ST, reperfusión <90min (ICP) o <30min (trombólisis) - Clopidogrel + AAS"),
  ("TEP (DIAGNÓSTICO)", "TEP: Wells score, dímero D, AngioTAC, anticoagulación con HBPM/rivaroxabán"),
  ("TB (RENAL)", "Tuberculosis Renal: Hematuria estéril, cultivo de Lowenstein-Jensen orina, RHZE ajuste en ERC"),
  ("TI-RADS", "TI-RADS (Thyroid Imaging Reporting): Clasificación ecográfica nódulos tiroideos, BAAF si ≥4"),
  ("MIGRAÑA", "Migraña: Triptanes (sumatriptán) en agudo, propranolol/topiramato en profilaxis"),
  ("VASCULITIS (KAWASAKI)", "Enfermedad de Kawasaki: Fiebre >5d + 4 de 5 criterios, IVIG + AAS - riesgo coronario"),
  ("TRAUMA ABDOMINAL", "Trauma Abdominal: FAST ultrasound, líquido libre peritoneal = cirugía urgente"),
  ("SANGRADO 1RA MITAD", "Sangrado 1er trimestre: Aborto amenazante vs inevitable, mola hidatiforme (β-hCG >100.000)"),
  ("CRUP (WESTLEY)", "Crup Laringotraqueítico - Score de Westley: dexametasona 0.6mg/kg, epinefrina nebulizada"),
  ("CADENA DE CUSTODIA", "Cadena de Custodia en Medicina Legal: Documentación forense, integridad de evidencia física"),
  ("HTA (URGENCIA)", "HTA Urgencia vs Emergencia: daño órgano blanco, Nitroprusiato IV en emergencia"),
  ("NEUMONÍA (CURB-65)", "Neumonía Adquirida en Comunidad - CURB-65: Score ≥2 hospitalizar, amoxicilina + macrólido"),
  ("HEPATITIS B (SERO)", "Hepatitis B: Interpretación serológica (HBsAg, Anti-HBs, Anti-HBc), vacunación"),
  ("CRISIS ADDISONIANA", "Crisis Addisoniana: Hipotensión + hiponatremia + hiperpotasemia, hidrocortisona IV 100mg STAT"),
  ("AKI (KDIGO)", "AKI - Guías KDIGO 2024: Creatinina ×1.5 en 7d o +0.3 en 48h, estadificación 1-3"),
  ("OBSTRUCCIÓN INTEST.", "Obstrucción Intestinal: Niveles hidroaéreos, SNG, cirugía si estrangulación"),
  ("PLACENTA PREVIA", "Placenta Previa: Sangrado indoloro, diagnóstico ecográfico, cesárea programada"),
  ("SENSIBILIDAD VS ESP.", "Bioestadística: Sensibilidad (VPN alto - descarta), Especificidad (VPP alto - confirma), LR"),
  ("LEY 1616 (S. MENTAL)", "Ley 1616/2013 - Salud Mental Colombia: Internamiento involuntario, consentimiento, derechos"),
  ("FIBRILACIÓN AURICULAR", "FA: Score CHA₂DS₂-VASc (anticoagulación), control de ritmo vs frecuencia, cardioversión"),
  ("DERRAME PLEURAL", "Derrame Pleural: Criterios de Light (exudado), toracocentesis diagnóstica, causas"),
  ("SEPSIS 3 (QSOFA)", "Sepsis 3.0: qSOFA ≥2, disfunción orgánica, lactato >2, cultivos + antibióticos <1h"),
  ("HIPERCALCEMIA", "Hipercalcemia: Hipercalcemia maligna (PTHrP), hiperparatiroidismo primario, tratamiento IV"),
  ("ALZHEIMER", "Alzheimer: MMSE, inhibidores colinesterasa (donepezilo), memantina en moderado-severo"),
  ("ERC (NEFRO-PROT)", "ERC - Nefroprotección: IECA/ARA2, iSGLT2, control PA <130/80, metas de albuminuria"),
  ("FISURA ANAL", "Fisura Anal: Aguda vs crónica, nitratos tópicos, esfinterotomía lateral en crónica"),
  ("RIESGO RELATIVO (RR)", "Bioestadística: RR, OR, RAR, NNT, NNH - interpretación en estudios clínicos"),
  ("PROTOCOLO SUICIDIO", "Protocolo de Atención Suicidio Colombia: Escala de riesgo, internamiento, Resolución 2481"),
  ("ENDOCARDITIS (DUKE)", "Endocarditis Infecciosa - Criterios Duke: hemocultivos + eco, antibióticos 4-6 semanas"),
  ("SRI (INTUBACIÓN)", "Secuencia Rápida de Intubación: Etomidato + Succinilcolina, laringoscopía directa vs video"),
  ("MENINGITIS BACTERIANA", "Meningitis Bacteriana: LCR turbia, glucosa baja, proteínas altas, cefalosporina 3G STAT"),
  ("METFORMINA", "Metformina: Primera línea DM2, contraindicada TFG<30, suspender contraste yodado"),
  ("PARKINSON", "Parkinson: Levodopa-carbidopa primera línea, temblor en reposo, fenómeno on-off"),
  ("HIPONATREMIA", "Hiponatremia: Clasificación por volumen, corrección lenta (máx 8-10 mEq/L/día), mielinólisis"),
  ("CÁNCER DE COLON", "Cáncer Colorrectal: Colonoscopia screening a 45 años, Lynch (MMR), FOLFOX en estadio III"),
  ("ANTICONCIPIÓN (CMS)", "Anticoncepción de Emergencia: Levonorgestrel <72h, meloxicam, criterios médicos de elegibilidad OMS"),
  ("VALOR P", "Valor P en investigación: significancia estadística, intervalo de confianza, error tipo I y II"),
  ("CONSENTIMIENTO INFORMADO", "Consentimiento Informado: Capacidad, información, voluntariedad - Ley 1751 y Ley 23/1981"),
  ("BLOQUEO AV (MOBITZ I)", "Bloqueo AV 2do grado Mobitz I (Wenckebach): Alargamiento PR progresivo, benigno"),
  ("IVU (PIELONEFRITIS)", "Pielonefritis Aguda: Fiebre + dolor lumbar + bacteriuria, ciprofloxacino 7 días"),
  ("DEPRESIÓN (ISRS)", "Depresión Mayor: ISRS primera línea, fluoxetina, evaluación riesgo suicida"),
  ("HIPERKALEMIA", "Hiperkalemia: ECG (ondas T picudas), gluconato de calcio IV, bicarbonato, kayexalato"),
  ("PANCREATITIS (ATLANTA)", "Pancreatitis Aguda - Atlanta 2012: Leve/Moderada/Severa, APACHE II, hidratación Ringer"),
  ("CÁNCER DE CÉRVIX", "Cáncer de Cérvix: VPH 16 y 18, colposcopia, LEEP, estadificación FIGO 2018"),
  ("RESOLUCIÓN 0-3960", "Resolución 3960/2019 - Colombia: Criterios internamiento no voluntario en salud mental"),
  ("BLOQUEO AV (MOBITZ II)", "Bloqueo AV 2do grado Mobitz II: PR fijo, QRS bloqueado, marcapasos obligatorio"),
  ("SÍFILIS CONGÉNITA", "Sífilis Congénita: Penicilina G cristalina IV al recién nacido, seguimiento VDRL"),
  ("PSICOSIS AGUDA", "Psicosis Aguda: Haloperidol IM en agitación, risperidona en mantenimiento"),
  ("ANION GAP", "Anión Gap: Na-(Cl+HCO3) normal 8-12, AG elevado (MUDPILES), diferencial acidosis metabólica"),
  ("FRACTURA COLLES", "Fractura de Colles: Caída en extensión, deformidad en dorso de tenedor, yeso vs cirugía"),
  ("BIOÉTICA (PRINCIPIALISMO)", "Bioética - Principios de Beauchamp y Childress: Autonomía, Beneficencia, No maleficencia, Justicia"),
  ("ESTENOSIS AÓRTICA", "Estenosis Aórtica: Tríada clásica (angina, síncope, ICC), gradiente >40mmHg, TAVI vs cx"),
  ("MALARIA (GOTA GRUESA)", "Malaria Colombia: Gota gruesa (diagnóstico), Plasmodium vivax (cloroquina+primaquina)"),
  ("TRASTORNO BIPOLAR", "Trastorno Bipolar: Litio primera línea, ácido valproico, carbamazepina, manía vs depresión"),
  ("ANEMIA FERROPÉNICA", "Anemia Ferropénica: Microcítica hipocrómica, ferritina baja, hierro oral 3-6 meses"),
  ("LUXACIÓN HOMBRO", "Luxación Glenohumeral Anterior: Maniobra de Cunningham, Kocher - reducción cerrada"),
  ("PERICARDITIS AGUDA", "Pericarditis Aguda: Roce pericárdico, supra ST cóncavo difuso, AINE + colchicina"),
  ("CELULITIS VS ERISIPELA", "Celulitis vs Erisipela: Erisipela bordes definidos (estreptococo), celulitis profunda difusa"),
  ("ANEMIA MEGALOBLÁS.", "Anemia Megaloblástica: B12 (neurológico) vs folato, VCM elevado, causa autoinmune (Biermer)"),
  ("MIOCARDITIS", "Miocarditis: RMN cardíaca (gold standard), troponina elevada sin coronarias, reposo"),
  ("PARASITISMO (EDA)", "EDA Parasitaria: Giardia (metronidazol), Entamoeba (tinidazol+iodoquinol), coproparasitológico"),
  ("LEUCEMIA AGUDA", "Leucemia Aguda: LLA (niños, vincristina) vs LMA (adultos, citarabina), blast >20%"),
  ("SHOCK CARDIOGÉNICO", "Shock Cardiogénico: Dobutamina, IABP, mortalidad alta - complicación IAMCEST"),
  ("MIELOMA MÚLTIPLE", "Mieloma Múltiple: CRAB (Calcio, Renal, Anemia, Bone), proteína Bence-Jones, bortezomib"),
  ("DISECCIÓN AÓRTICA", "Disección Aórtica: Stanford A (cirugía STAT), Stanford B (médico), labetalol IV, AngioTAC"),
];
